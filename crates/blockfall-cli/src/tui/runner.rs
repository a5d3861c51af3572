use std::{io, time::Duration};

use blockfall_engine::TickScheduler;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use log::debug;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// TUI application runtime.
///
/// Manages the event loop and executes applications that implement the `App` trait.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
    mouse_capture: bool,
}

impl Tui {
    /// Creates a new Tui.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports mouse events to the application while running.
    pub fn with_mouse_capture(self, mouse_capture: bool) -> Self {
        Self {
            mouse_capture,
            ..self
        }
    }

    /// Sets the tick interval, restarting the countdown.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        debug!(
            "tick interval {:?} -> {:?}",
            self.events.tick_interval(),
            interval
        );
        self.events.set_tick_interval(interval);
    }

    /// Schedules a render before the next event is read.
    pub fn request_redraw(&mut self) {
        self.events.mark_dirty();
    }

    /// Runs the application until `app.should_exit()` returns true.
    ///
    ///
    /// - `Event::Tick`: calls `app.update()`
    /// - `Event::Render`: calls `app.draw()`
    /// - `Event::Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            if self.mouse_capture {
                execute!(io::stdout(), EnableMouseCapture)?;
            }
            let result = self.event_loop(terminal, app);
            if self.mouse_capture {
                execute!(io::stdout(), DisableMouseCapture)?;
            }
            result
        })
    }

    fn event_loop<A>(
        &mut self,
        terminal: &mut ratatui::DefaultTerminal,
        app: &mut A,
    ) -> anyhow::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Tick => {
                    app.update(self);
                }
                TuiEvent::Render => {
                    terminal.draw(|f| app.draw(f))?;
                }
                TuiEvent::Crossterm(event) => {
                    app.handle_event(self, event);
                }
            }
        }
        Ok(())
    }
}

impl TickScheduler for Tui {
    fn schedule(&mut self, interval: Duration) {
        self.set_tick_interval(Some(interval));
    }

    fn cancel(&mut self) {
        self.set_tick_interval(None);
    }
}
