/// Player commands accepted by [`GameSession::apply`](crate::GameSession::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    /// Starts a new game, or restarts the current one.
    Start,
}
