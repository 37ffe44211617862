//! Highlight legend: which elements the current step marks, and how

use super::border_style;
use crate::snapshot::Highlights;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

pub fn render_highlights_pane(
    frame: &mut Frame,
    area: Rect,
    highlights: Option<&Highlights>,
    is_focused: bool,
) {
    let block = Block::default()
        .title(" Highlights ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let Some(highlights) = highlights.filter(|h| !h.is_empty()) else {
        let paragraph = Paragraph::new("(none)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let items: Vec<ListItem> = highlights
        .iter()
        .map(|(id, role)| {
            let color = DEFAULT_THEME.role_color(*role);
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12}", id.to_string()),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
                Span::styled(
                    role.label(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let block = block.padding(Padding::new(1, 0, 0, 0));
    frame.render_widget(List::new(items).block(block), area);
}
