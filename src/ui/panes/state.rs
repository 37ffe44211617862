//! Snapshot pane: the domain state of the current step

use super::border_style;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

pub struct StateRenderData {
    pub title: String,
    /// Output of `DomainState::describe`
    pub lines: Vec<String>,
    /// Answer carried by the current step, if any
    pub result: Option<String>,
}

pub fn render_state_pane(
    frame: &mut Frame,
    area: Rect,
    data: &StateRenderData,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" {} ", data.title))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused))
        .padding(Padding::new(1, 1, 0, 0));

    let mut lines: Vec<Line> = data
        .lines
        .iter()
        .map(|l| Line::from(Span::styled(l.as_str(), Style::default().fg(DEFAULT_THEME.fg))))
        .collect();
    if let Some(result) = &data.result {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Result: ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                result.as_str(),
                Style::default()
                    .fg(DEFAULT_THEME.success)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
