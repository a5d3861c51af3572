use std::time::Duration;

/// Periodic tick source driven by a [`GameSession`](crate::GameSession).
///
/// The session decides when gravity ticks must run and at what rate; the
/// frontend owns the actual timer. At most one tick source is active at a
/// time.
pub trait TickScheduler {
    /// Replaces any active tick source with one firing every `interval`.
    ///
    /// The first tick is due one full `interval` after this call.
    fn schedule(&mut self, interval: Duration);

    /// Stops the active tick source, if any.
    fn cancel(&mut self);
}

/// Scheduler for callers that drive ticks themselves (tests, replays).
impl TickScheduler for () {
    fn schedule(&mut self, _interval: Duration) {}

    fn cancel(&mut self) {}
}
