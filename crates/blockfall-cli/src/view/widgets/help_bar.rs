use blockfall_engine::SessionState;
use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Span},
    widgets::Widget,
};

use crate::view::widgets::style;

#[derive(Debug, Clone, Copy)]
struct Hint {
    keys: &'static str,
    action: &'static str,
}

const fn hint(keys: &'static str, action: &'static str) -> Hint {
    Hint { keys, action }
}

const QUIT: Hint = hint("Q", "Quit");

const READY_HINTS: &[Hint] = &[hint("Enter/S", "Start"), QUIT];
const RUNNING_HINTS: &[Hint] = &[
    hint("←/→", "Move"),
    hint("↓", "Soft Drop"),
    hint("↑", "Rotate"),
    hint("Space", "Hard Drop"),
    hint("P", "Pause"),
    QUIT,
];
const PAUSED_HINTS: &[Hint] = &[hint("P", "Resume"), hint("Enter/S", "Restart"), QUIT];
const GAME_OVER_HINTS: &[Hint] = &[hint("Enter/S", "Restart"), QUIT];

/// Bottom line listing the keys that do something in the current state.
#[derive(Debug, Clone, Copy)]
pub struct HelpBar {
    state: SessionState,
}

impl HelpBar {
    pub fn new(state: SessionState) -> Self {
        Self { state }
    }

    fn hints(self) -> &'static [Hint] {
        match self.state {
            SessionState::Ready => READY_HINTS,
            SessionState::Running => RUNNING_HINTS,
            SessionState::Paused => PAUSED_HINTS,
            SessionState::GameOver => GAME_OVER_HINTS,
        }
    }
}

impl Widget for HelpBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans = self.hints().iter().enumerate().flat_map(|(i, hint)| {
            let gap = (i > 0).then(|| Span::raw("  "));
            gap.into_iter().chain([
                Span::styled(hint.keys, style::HELP_KEY),
                Span::styled(format!(" {}", hint.action), style::HELP_ACTION),
            ])
        });
        Line::from_iter(spans).centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(state: SessionState) -> String {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        HelpBar::new(state).render(area, &mut buf);
        (0..area.width).map(|x| buf[(x, 0)].symbol()).collect()
    }

    #[test]
    fn test_hints_follow_state() {
        assert!(render(SessionState::Ready).contains("Enter/S Start  Q Quit"));
        let running = render(SessionState::Running);
        assert!(running.contains("Space Hard Drop"));
        assert!(!running.contains("Start"));
        assert!(render(SessionState::Paused).contains("P Resume"));
        assert!(render(SessionState::GameOver).contains("Enter/S Restart"));
    }
}
