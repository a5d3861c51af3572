use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Produces ticks at the configured interval, a render whenever the screen is
/// marked dirty, and terminal events in between.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with ticks disabled.
    pub fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval and restarts the countdown.
    ///
    /// The next tick fires one full `interval` from now, whatever was left of
    /// the previous one. Pass `None` to disable tick events.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    pub(super) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    pub(super) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns the next event.
    ///
    /// Blocks until the next tick is due, a render is pending, or a crossterm
    /// event occurs. Without a tick interval, only waits for crossterm events.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            let event = event::read()?;
            if matches!(event, Event::Resize(..)) {
                self.dirty = true;
            }
            return Ok(event.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval)?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_disabled_by_default() {
        let events = EventLoop::new();
        assert_eq!(events.tick_interval(), None);
        assert_eq!(events.compute_timeout(Instant::now()), None);
    }

    #[test]
    fn test_set_interval_restarts_countdown() {
        let mut events = EventLoop::new();
        events.last_tick = Instant::now().checked_sub(Duration::from_secs(5)).unwrap();

        events.set_tick_interval(Some(Duration::from_millis(900)));
        let timeout = events.compute_timeout(Instant::now()).unwrap();
        assert!(timeout > Duration::from_millis(800), "{timeout:?}");
        assert!(timeout <= Duration::from_millis(900), "{timeout:?}");
    }

    #[test]
    fn test_pending_render_comes_first() {
        let mut events = EventLoop::new();
        assert!(events.next().unwrap().is_render());

        events.mark_dirty();
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_due_tick_is_returned() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(10)));
        events.last_tick = Instant::now().checked_sub(Duration::from_millis(20)).unwrap();
        assert!(events.next().unwrap().is_tick());
    }
}
