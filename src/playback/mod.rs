//! Timeline playback
//!
//! - [`controller`]: cursor, transport and elapsed-time autoplay over one
//!   installed [`Timeline`](crate::snapshot::Timeline)
//! - [`paced`]: cancellable one-step-per-delay publication
//! - [`session`]: committed model plus controller, the object domain
//!   commands operate on

pub mod controller;
pub mod paced;
pub mod session;

pub use controller::{PlaybackController, PlaybackStatus};
pub use paced::{LivenessToken, PacedRun};
pub use session::{Publish, Session};
