use crate::step::ColorTag;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub bar_base: Color,
    pub bar_comparison: Color,
    pub bar_pivot: Color,
    pub bar_label: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    bar_base: Color::Rgb(137, 180, 250),       // Blue bars at rest
    bar_comparison: Color::Rgb(243, 139, 168), // Red while compared
    bar_pivot: Color::Rgb(166, 227, 161),      // Green pivot
    bar_label: Color::Rgb(30, 30, 46),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border while sorting
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),
};

impl Theme {
    /// Bar color for a step tag
    pub fn tag_color(&self, tag: ColorTag) -> Color {
        match tag {
            ColorTag::Base => self.bar_base,
            ColorTag::Comparison => self.bar_comparison,
            ColorTag::Pivot => self.bar_pivot,
        }
    }
}
