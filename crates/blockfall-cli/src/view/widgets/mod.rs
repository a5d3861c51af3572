use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, help_bar::*, piece_display::*, session_display::*,
    session_stats_display::*,
};

mod block_display;
mod board_display;
mod help_bar;
mod piece_display;
mod session_display;
mod session_stats_display;

mod color {
    use blockfall_engine::PieceKind;
    use ratatui::style::Color;

    pub const BACKGROUND: Color = Color::Rgb(0, 0, 0);
    pub const FOREGROUND: Color = Color::Rgb(255, 255, 255);
    pub const MUTED: Color = Color::Rgb(127, 127, 127);
    pub const ACCENT: Color = Color::Rgb(0, 255, 255);
    pub const WARNING: Color = Color::Rgb(255, 255, 0);
    pub const DANGER: Color = Color::Rgb(255, 0, 0);

    pub const fn piece(kind: PieceKind) -> Color {
        match kind {
            PieceKind::I => Color::Rgb(0, 255, 255),
            PieceKind::O => Color::Rgb(255, 255, 0),
            PieceKind::T => Color::Rgb(255, 0, 255),
            PieceKind::S => Color::Rgb(0, 255, 0),
            PieceKind::Z => Color::Rgb(255, 0, 0),
            PieceKind::J => Color::Rgb(0, 0, 255),
            PieceKind::L => Color::Rgb(255, 127, 0),
        }
    }
}

pub mod style {
    use blockfall_engine::PieceKind;
    use ratatui::style::Style;

    use crate::view::widgets::color;

    pub const DEFAULT: Style = Style::new().fg(color::FOREGROUND).bg(color::BACKGROUND);
    pub const EMPTY: Style = Style::new().bg(color::BACKGROUND);
    pub const EMPTY_DOT: Style = Style::new().fg(color::MUTED).bg(color::BACKGROUND);

    pub const READY_BANNER: Style = Style::new().fg(color::BACKGROUND).bg(color::ACCENT);
    pub const PAUSED_BANNER: Style = Style::new().fg(color::BACKGROUND).bg(color::WARNING);
    pub const GAME_OVER_BANNER: Style = Style::new().fg(color::FOREGROUND).bg(color::DANGER);

    pub const HELP_KEY: Style = Style::new().fg(color::ACCENT);
    pub const HELP_ACTION: Style = Style::new().fg(color::MUTED);

    /// Solid cell in the piece's color.
    pub const fn piece(kind: PieceKind) -> Style {
        let fill = color::piece(kind);
        Style::new().fg(fill).bg(fill)
    }
}

/// Columns and rows taken by a block's borders and padding, as `(width, height)`.
fn chrome_size(block: Option<&BlockWidget>) -> (u16, u16) {
    let Some(block) = block else {
        return (0, 0);
    };
    let outer = Rect::new(0, 0, 100, 100);
    let inner = block.inner(outer);
    (outer.width - inner.width, outer.height - inner.height)
}
