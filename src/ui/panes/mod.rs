//! TUI pane rendering modules
//!
//! - [`state`]: the current step's snapshot, rendered through
//!   `DomainState::describe`, plus its result
//! - [`narration`]: step messages up to the cursor
//! - [`highlights`]: elements marked by the current step and their roles
//! - [`status`]: status bar with keybindings and playback state
//!
//! Each pane exports a stateless `render_*` function.

pub mod highlights;
pub mod narration;
pub mod state;
pub mod status;

pub use highlights::render_highlights_pane;
pub use narration::render_narration_pane;
pub use state::{render_state_pane, StateRenderData};
pub use status::{render_status_bar, StatusRenderData};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Yellow bold border when focused, grey otherwise
fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}
