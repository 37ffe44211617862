//! Algorithm runners
//!
//! Each runner executes a real algorithm on a working copy of a domain model
//! and reports every decision point to a [`Recorder`](crate::snapshot::Recorder).
//! Runners are deterministic: the same input always yields the same
//! timeline.
//!
//! Every module exposes two layers:
//!
//! - a convenience entry point (`run`, `insert`, `lcs`, ...) that clones the
//!   input, records into a [`TimelineRecorder`](crate::snapshot::TimelineRecorder)
//!   and returns the finished [`Timeline`](crate::snapshot::Timeline);
//! - the generic core (`*_with`) that mutates a state in place through any
//!   recorder, which is what bulk builds call with a
//!   [`NullRecorder`](crate::snapshot::NullRecorder).
//!
//! Running out of room, missing values and duplicates are reported as the
//! final narrated step of the timeline, not as errors.

pub mod dp;
pub mod graph;
pub mod hashing;
pub mod linear;
pub mod pathfinding;
pub mod search;
pub mod sorting;
pub mod tree;
