// Theme for the TUI
//
// Uses the terminal's ANSI palette so the table follows the user's color
// scheme.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Color,
    pub border: Color,
    pub border_type: BorderType,

    // Table
    pub header: Color,
    /// Header of the column the table is sorted by
    pub header_sorted: Color,
    /// Background of the column under the cursor
    pub selected_column: Color,
    pub row_alt: Color,

    // Pagination
    pub control: Color,
    pub control_disabled: Color,

    // Status and overlays
    pub status_bar: Color,
    pub error: Color,
    pub warning: Color,
    pub highlight: Color,
    pub foreground: Color,
    pub background: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Color::Cyan,
            border: Color::White,
            border_type: BorderType::Rounded,
            header: Color::White,
            header_sorted: Color::Yellow,
            selected_column: Color::DarkGray,
            row_alt: Color::Gray,
            control: Color::Cyan,
            control_disabled: Color::DarkGray,
            status_bar: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            highlight: Color::Yellow,
            foreground: Color::Reset,
            background: Color::Reset,
        }
    }
}
