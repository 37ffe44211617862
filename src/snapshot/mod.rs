//! Snapshot recording for step-through playback
//!
//! Every algorithm runner reports its progress through a [`Recorder`]. The
//! [`TimelineRecorder`] freezes each reported state into an immutable [`Step`]
//! and collects them into a [`Timeline`]; the [`NullRecorder`] discards them so
//! the same algorithm core can also build a structure instantly.
//!
//! # Aliasing
//!
//! Domain states are plain owned value trees (node arenas addressed by index,
//! no shared pointers), so cloning one is a full structural copy. A recorded
//! step can never observe later mutation of the runner's working copy.

pub mod recorder;
pub mod step;
pub mod timeline;

pub use recorder::{NullRecorder, Recorder, TimelineRecorder};
pub use step::{ElementId, Highlights, ResultMarker, Role, Step};
pub use timeline::Timeline;

use std::fmt;

/// Which visualizer produced a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    Sorting,
    BinarySearch,
    Tree,
    Graph,
    HashTable,
    DynamicProgramming,
    Pathfinding,
    LinkedList,
    Stack,
    Queue,
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DomainKind::Sorting => "Sorting",
            DomainKind::BinarySearch => "Binary Search",
            DomainKind::Tree => "Tree",
            DomainKind::Graph => "Graph",
            DomainKind::HashTable => "Hash Table",
            DomainKind::DynamicProgramming => "Dynamic Programming",
            DomainKind::Pathfinding => "Pathfinding",
            DomainKind::LinkedList => "Linked List",
            DomainKind::Stack => "Stack",
            DomainKind::Queue => "Queue",
        };
        f.write_str(name)
    }
}

/// A domain model that can be frozen into a [`Step`].
///
/// `describe` renders the state as plain text lines; it exists so that
/// consumers without domain knowledge (the terminal front end, `--print`)
/// can still show something useful.
pub trait DomainState: Clone + PartialEq + fmt::Debug {
    fn kind(&self) -> DomainKind;

    fn describe(&self) -> Vec<String>;
}
