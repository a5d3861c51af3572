use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for TUI applications.
///
/// Applications executed by `Tui::run()` must implement this trait.
pub trait App {
    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    ///
    /// Call [`Tui::request_redraw`] when the event changed what is on screen.
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Draws the screen (called on each `Event::Render`).
    fn draw(&self, frame: &mut Frame);

    /// Advances the application (called on each `Event::Tick`).
    fn update(&mut self, tui: &mut Tui);
}
