use log::{debug, info};

use crate::{Grid, Piece};

use super::{
    Command, GameStats, HARD_DROP_POINTS, PieceBuffer, PieceSeed, SOFT_DROP_POINTS, TickScheduler,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Waiting for the first start.
    Ready,
    Running,
    Paused,
    GameOver,
}

/// Result of a gravity step ([`GameSession::tick`] or [`GameSession::hard_drop`]).
///
/// Anything other than [`StepOutcome::Ignored`] changed the visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StepOutcome {
    /// The session is not running.
    Ignored,
    /// The falling piece moved down one row.
    Fell,
    /// The piece locked and the next one spawned.
    Locked { cleared_lines: usize },
    /// The piece locked and the next one collided at its spawn position.
    ToppedOut { cleared_lines: usize },
}

/// A single game from start to top-out.
///
/// Owns the grid, the falling piece, the lookahead buffer and the counters.
/// The session never drives time itself: the frontend calls [`Self::tick`]
/// whenever the tick source set up through a [`TickScheduler`] fires.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Command, GameSession, SessionState};
///
/// let mut session = GameSession::new();
/// assert_eq!(session.state(), SessionState::Ready);
///
/// session.apply(Command::Start, &mut ());
/// assert!(session.state().is_running());
///
/// session.apply(Command::HardDrop, &mut ());
/// assert_eq!(session.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    falling_piece: Option<Piece>,
    piece_buffer: PieceBuffer,
    stats: GameStats,
    state: SessionState,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_piece_buffer(PieceBuffer::new())
    }

    /// Like [`Self::new`], but pieces come from a seeded generator.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_piece_buffer(PieceBuffer::with_seed(seed))
    }

    fn with_piece_buffer(piece_buffer: PieceBuffer) -> Self {
        Self {
            grid: Grid::EMPTY,
            falling_piece: None,
            piece_buffer,
            stats: GameStats::new(),
            state: SessionState::Ready,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The piece under player control.
    ///
    /// `None` before the first start. After a top-out this is the piece that
    /// failed to spawn.
    #[must_use]
    pub fn falling_piece(&self) -> Option<&Piece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        self.piece_buffer.next_piece()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Starts a new game, discarding any game in progress.
    pub fn start(&mut self, scheduler: &mut impl TickScheduler) {
        scheduler.cancel();

        self.grid = Grid::EMPTY;
        self.stats = GameStats::new();
        self.piece_buffer.reset();
        self.falling_piece = Some(self.piece_buffer.pop_next());
        self.state = SessionState::Running;

        info!("game started");
        scheduler.schedule(self.stats.drop_interval());
    }

    /// Gravity step: moves the falling piece down, or locks it when it has landed.
    pub fn tick(&mut self, scheduler: &mut impl TickScheduler) -> StepOutcome {
        if !self.state.is_running() {
            return StepOutcome::Ignored;
        }
        let Some(piece) = self.falling_piece.as_mut() else {
            return StepOutcome::Ignored;
        };
        if piece.try_move(&self.grid, 0, 1) {
            return StepOutcome::Fell;
        }
        self.lock_and_spawn(scheduler)
    }

    /// Drops the falling piece to its landing position and locks it.
    ///
    /// Awards [`HARD_DROP_POINTS`] per row travelled.
    pub fn hard_drop(&mut self, scheduler: &mut impl TickScheduler) -> StepOutcome {
        if !self.state.is_running() {
            return StepOutcome::Ignored;
        }
        let Some(piece) = self.falling_piece.as_mut() else {
            return StepOutcome::Ignored;
        };
        let mut rows = 0;
        while piece.try_move(&self.grid, 0, 1) {
            rows += 1;
        }
        self.stats.add_drop_points(rows * HARD_DROP_POINTS);
        self.lock_and_spawn(scheduler)
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Moves the falling piece down one row, awarding [`SOFT_DROP_POINTS`] if it moved.
    ///
    /// A soft drop never locks the piece; that is left to the next tick.
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if moved {
            self.stats.add_drop_points(SOFT_DROP_POINTS);
        }
        moved
    }

    pub fn rotate(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.falling_piece
            .as_mut()
            .is_some_and(|piece| piece.try_rotate(&self.grid))
    }

    /// Switches between running and paused.
    ///
    /// Returns `false` without doing anything before the first start and after
    /// game over.
    pub fn toggle_pause(&mut self, scheduler: &mut impl TickScheduler) -> bool {
        match self.state {
            SessionState::Running => {
                scheduler.cancel();
                self.state = SessionState::Paused;
                info!("game paused");
            }
            SessionState::Paused => {
                self.state = SessionState::Running;
                scheduler.schedule(self.stats.drop_interval());
                info!("game resumed");
            }
            SessionState::Ready | SessionState::GameOver => return false,
        }
        true
    }

    /// Dispatches a player command.
    ///
    /// Returns whether the visible state changed.
    pub fn apply(&mut self, command: Command, scheduler: &mut impl TickScheduler) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.soft_drop(),
            Command::Rotate => self.rotate(),
            Command::HardDrop => !self.hard_drop(scheduler).is_ignored(),
            Command::TogglePause => self.toggle_pause(scheduler),
            Command::Start => {
                self.start(scheduler);
                true
            }
        }
    }

    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.falling_piece
            .as_mut()
            .is_some_and(|piece| piece.try_move(&self.grid, dx, dy))
    }

    fn lock_and_spawn(&mut self, scheduler: &mut impl TickScheduler) -> StepOutcome {
        if let Some(piece) = self.falling_piece.take() {
            self.grid.fill_piece(&piece);
            debug!("{} locked at {:?}", piece.kind(), piece.position());
        }

        let cleared_lines = self.grid.clear_full_rows();
        let prev_level = self.stats.level();
        let prev_interval = self.stats.drop_interval();
        let points = self.stats.complete_piece_drop(cleared_lines);
        if cleared_lines > 0 {
            debug!("cleared {cleared_lines} line(s) for {points} points");
        }
        if self.stats.level() != prev_level {
            info!("level {} reached", self.stats.level());
        }

        let piece = self.piece_buffer.pop_next();
        self.falling_piece = Some(piece);
        if piece.collides(&self.grid) {
            self.state = SessionState::GameOver;
            scheduler.cancel();
            info!("game over: score {}", self.stats.score());
            return StepOutcome::ToppedOut { cleared_lines };
        }

        let interval = self.stats.drop_interval();
        if interval != prev_interval {
            scheduler.schedule(interval);
        }
        StepOutcome::Locked { cleared_lines }
    }
}
