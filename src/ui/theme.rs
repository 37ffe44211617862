use crate::snapshot::Role;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub highlight: Color, // Yellow
    pub accent: Color,    // Cyan
    pub special: Color,   // Pink
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    highlight: Color::Rgb(249, 226, 175),
    accent: Color::Rgb(148, 226, 213),
    special: Color::Rgb(245, 194, 231),
};

impl Theme {
    /// Colour used for an element in `role`
    pub fn role_color(&self, role: Role) -> Color {
        match role {
            Role::Comparing | Role::Probing | Role::Mid => self.highlight,
            Role::Swapping | Role::Overwriting | Role::Rotating | Role::Collision => self.error,
            Role::Pivot | Role::Computing | Role::Relaxing => self.secondary,
            Role::Sorted | Role::Found | Role::Path | Role::Inserted => self.success,
            Role::Visiting | Role::Active => self.primary,
            Role::Frontier | Role::Dependency | Role::Low | Role::High => self.accent,
            Role::Visited => self.comment,
            Role::Removed => self.special,
        }
    }
}
