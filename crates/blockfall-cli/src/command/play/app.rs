use std::time::Instant;

use blockfall_engine::{Command, GameSession, PieceSeed};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    config::PlayConfig,
    input::{self, GestureSettings, GestureTracker, KeyAction},
    tui::{App, Tui},
    view::widgets::{HelpBar, SessionDisplay},
};

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    gestures: Option<GestureTracker>,
    show_grid_dots: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(seed: PieceSeed, config: &PlayConfig) -> Self {
        Self {
            session: GameSession::with_seed(seed),
            gestures: config
                .mouse
                .then(|| GestureTracker::new(GestureSettings::from(config))),
            show_grid_dots: config.show_grid_dots,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn apply(&mut self, tui: &mut Tui, command: Command) {
        if self.session.apply(command, tui) {
            tui.request_redraw();
        }
    }
}

impl App for PlayApp {
    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        match event {
            Event::Key(key) => match input::key_action(&key) {
                Some(KeyAction::Game(command)) => self.apply(tui, command),
                Some(KeyAction::Quit) => self.is_exiting = true,
                None => {}
            },
            Event::Mouse(mouse) => {
                let command = self
                    .gestures
                    .as_mut()
                    .and_then(|gestures| gestures.handle(mouse, Instant::now()));
                if let Some(command) = command {
                    self.apply(tui, command);
                }
            }
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display =
            SessionDisplay::new(&self.session).show_grid_dots(self.show_grid_dots);

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(HelpBar::new(self.session.state()), help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        if !self.session.tick(tui).is_ignored() {
            tui.request_redraw();
        }
    }
}
