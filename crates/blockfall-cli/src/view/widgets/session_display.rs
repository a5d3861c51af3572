use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// Full game screen: stats on the left, the board, and the next piece on the right.
///
/// A banner over the board shows the start prompt, the pause notice or the
/// final score.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    show_grid_dots: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            show_grid_dots: true,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn show_grid_dots(self, show_grid_dots: bool) -> Self {
        Self {
            show_grid_dots,
            ..self
        }
    }

    fn banner(&self) -> Option<(Vec<Line<'static>>, Style)> {
        let banner = match self.session.state() {
            SessionState::Running => return None,
            SessionState::Ready => (
                vec![Line::from("BLOCKFALL"), Line::from("Press Enter to start")],
                style::READY_BANNER,
            ),
            SessionState::Paused => (vec![Line::from("PAUSED")], style::PAUSED_BANNER),
            SessionState::GameOver => (
                vec![
                    Line::from("GAME OVER"),
                    Line::from(format!("SCORE: {}", self.session.stats().score())),
                    Line::from("Press Enter to restart"),
                ],
                style::GAME_OVER_BANNER,
            ),
        };
        Some(banner)
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let state = self.session.state();
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match state {
            SessionState::Ready | SessionState::Running => color::FOREGROUND,
            SessionState::Paused => color::WARNING,
            SessionState::GameOver => color::DANGER,
        };

        let game_board = BoardDisplay::new(self.session.grid())
            .falling_piece(self.session.falling_piece().copied())
            .show_dots(self.show_grid_dots)
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        // The lookahead exists before the first start, but is only revealed once playing.
        let next_piece = (!state.is_ready()).then(|| *self.session.next_piece());
        let next_panel = PieceDisplay::default().piece(next_piece).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let session_stats = SessionStatsDisplay::new(self.session.stats()).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((lines, style)) = self.banner() {
            #[expect(clippy::cast_possible_truncation)]
            let text_height = lines.len() as u16;
            let text = Text::from(lines).style(style).centered();
            let block = Block::new().style(style);
            let area = board_area.centered(
                Constraint::Length(game_board_width),
                Constraint::Length(text_height + 2),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(text_height)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Command, PieceSeed};

    use super::*;

    fn screen_text(session: &GameSession) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(session).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn session() -> GameSession {
        let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
        GameSession::with_seed(seed)
    }

    #[test]
    fn test_ready_shows_start_prompt() {
        let text = screen_text(&session());
        assert!(text.contains("Press Enter to start"));
        assert!(text.contains("NEXT"));
        assert!(text.contains("STATS"));
    }

    #[test]
    fn test_running_has_no_banner() {
        let mut session = session();
        session.apply(Command::Start, &mut ());
        let text = screen_text(&session);
        assert!(!text.contains("Press Enter"));
        assert!(!text.contains("PAUSED"));
    }

    #[test]
    fn test_paused_banner() {
        let mut session = session();
        session.apply(Command::Start, &mut ());
        session.apply(Command::TogglePause, &mut ());
        assert!(screen_text(&session).contains("PAUSED"));
    }

    #[test]
    fn test_game_over_shows_final_score() {
        let mut session = session();
        session.apply(Command::Start, &mut ());
        while !session.state().is_game_over() {
            session.apply(Command::HardDrop, &mut ());
        }
        let text = screen_text(&session);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains(&format!("SCORE: {}", session.stats().score())));
    }
}
