//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus and the
//!   elapsed-time tick that drives paced publication and autoplay
//! - **[`panes`]**: stateless render functions for each visible pane (state,
//!   narration, highlights, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`Session`] that already holds a timeline and call [`App::run`] to start
//! the event loop. The UI only reads the current step and calls transport
//! methods; it never runs an algorithm itself.
//!
//! [`Session`]: crate::playback::Session
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
