//! Domain models for every visualizer
//!
//! Each model is pure data plus the helpers that keep its invariants:
//! - [`array`]: sortable arrays and the binary search window
//! - [`tree`]: BST/AVL node arena
//! - [`graph`]: weighted graph with traversal bookkeeping
//! - [`hash`]: chained and open-addressing hash tables
//! - [`dp`]: dynamic programming grids
//! - [`grid`]: weighted pathfinding grid
//! - [`linear`]: linked list, bounded stack and queue
//!
//! Linked structures are arenas addressed by index rather than pointer
//! graphs, so `Clone` is a full structural copy and recorded steps never
//! share substructure with the working copy.

pub mod array;
pub mod dp;
pub mod graph;
pub mod grid;
pub mod hash;
pub mod linear;
pub mod tree;

/// Identifier of a node inside an arena
pub type NodeId = usize;

/// Render a list of values as `[a, b, c]`
pub(crate) fn bracketed<T: ToString>(values: &[T]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
