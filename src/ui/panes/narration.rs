//! Narration pane: the message of every step up to the cursor

use super::border_style;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the narration log. The newest message is emphasised.
pub fn render_narration_pane(
    frame: &mut Frame,
    area: Rect,
    messages: &[&str],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Narration ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if messages.is_empty() {
        let paragraph = Paragraph::new("(nothing yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let last = messages.len() - 1;
    let all_items: Vec<ListItem> = messages
        .iter()
        .enumerate()
        .map(|(i, message)| {
            let style = if i == last {
                Style::default()
                    .fg(DEFAULT_THEME.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(format!("{:>3}  {}", i + 1, message)).style(style)
        })
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // usize::MAX means "follow the newest message"
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
