use std::time::{Duration, Instant};

use blockfall_engine::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::config::PlayConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub enum KeyAction {
    Game(Command),
    Quit,
}

/// Maps a key press to an action. Releases and repeats of other kinds are ignored.
pub fn key_action(event: &KeyEvent) -> Option<KeyAction> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let action = match event.code {
        KeyCode::Left => Command::MoveLeft.into(),
        KeyCode::Right => Command::MoveRight.into(),
        KeyCode::Down => Command::SoftDrop.into(),
        KeyCode::Up => Command::Rotate.into(),
        KeyCode::Char(' ') => Command::HardDrop.into(),
        KeyCode::Char('p' | 'P') => Command::TogglePause.into(),
        KeyCode::Enter | KeyCode::Char('s' | 'S') => Command::Start.into(),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureSettings {
    /// Minimum travel of a swipe, in board cells.
    pub swipe_threshold: i32,
    /// Maximum press duration of a tap.
    pub tap_threshold: Duration,
}

impl From<&PlayConfig> for GestureSettings {
    fn from(config: &PlayConfig) -> Self {
        Self {
            swipe_threshold: i32::from(config.swipe_threshold),
            tap_threshold: config.tap_threshold(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    column: u16,
    row: u16,
    at: Instant,
}

/// Turns left-button press/release pairs into game commands.
///
/// - Short press without travel: rotate
/// - Mostly horizontal drag: move one column in that direction
/// - Mostly downward drag: hard drop
///
/// Distances are measured in board cells: a board cell is two terminal
/// columns wide and one row tall.
#[derive(Debug)]
pub struct GestureTracker {
    settings: GestureSettings,
    press: Option<Press>,
}

impl GestureTracker {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            press: None,
        }
    }

    pub fn handle(&mut self, event: MouseEvent, now: Instant) -> Option<Command> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press = Some(Press {
                    column: event.column,
                    row: event.row,
                    at: now,
                });
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let press = self.press.take()?;
                let dx = (i32::from(event.column) - i32::from(press.column)) / 2;
                let dy = i32::from(event.row) - i32::from(press.row);
                self.classify(dx, dy, now.saturating_duration_since(press.at))
            }
            _ => None,
        }
    }

    fn classify(&self, dx: i32, dy: i32, held: Duration) -> Option<Command> {
        let GestureSettings {
            swipe_threshold,
            tap_threshold,
        } = self.settings;
        let (abs_x, abs_y) = (dx.abs(), dy.abs());

        if abs_x < swipe_threshold && abs_y < swipe_threshold && held < tap_threshold {
            return Some(Command::Rotate);
        }
        if abs_x > abs_y && abs_x > swipe_threshold {
            return Some(if dx > 0 {
                Command::MoveRight
            } else {
                Command::MoveLeft
            });
        }
        if abs_y > abs_x && abs_y > swipe_threshold && dy > 0 {
            return Some(Command::HardDrop);
        }
        None
    }
}
