//! # Introduction
//!
//! algoscope runs classic algorithms over real data structures and records an
//! immutable snapshot at every decision point: each comparison, swap, probe,
//! rotation or table fill. The resulting timeline is then replayed forward
//! and backward, stepped, scrubbed or autoplayed through a terminal UI built
//! with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Input → Command (validation) → Runner → Timeline → Session → Playback → TUI
//! ```
//!
//! 1. [`model`]: the domain states (array, search window, tree arena, graph,
//!    hash table, DP grid, weighted grid, linked list, stack and queue).
//! 2. [`runners`]: deterministic algorithms that report every state they pass
//!    through to a [`snapshot::Recorder`].
//! 3. [`snapshot`]: immutable [`snapshot::Step`]s collected into a
//!    [`snapshot::Timeline`].
//! 4. [`playback`]: cursor and transport over a timeline, plus the
//!    [`playback::Session`] that owns the committed model and publishes
//!    operations either all at once or one paced step at a time.
//! 5. [`commands`]: per-domain operations on a session, with input
//!    validation ([`error::InputError`]).
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! Sorting: bubble, selection, insertion, merge, quick, heap.
//! Searching: binary search. Trees: BST and AVL insert, search, remove,
//! traversals. Graphs: BFS, DFS, Dijkstra. Hashing: chaining and linear
//! probing. DP: LCS, 0/1 knapsack, Fibonacci. Grids: Dijkstra, A*, BFS, DFS.
//! Linear: linked list, bounded stack and queue.

pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod playback;
pub mod runners;
pub mod snapshot;
pub mod ui;
