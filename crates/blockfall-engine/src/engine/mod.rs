//! Game rules on top of the [`core`](crate::core) data structures.
//!
//! - [`GameSession`] - One game: state machine, gravity, locking, line clears
//! - [`GameStats`] - Score, cleared lines, level and drop interval
//! - [`PieceGenerator`] - Uniform random piece source
//! - [`PieceBuffer`] - One-piece lookahead for the preview panel
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`TickScheduler`] - Timer seam implemented by the frontend
//! - [`Command`] - Player commands
//!
//! # Game Flow
//!
//! 1. [`GameSession::start`] clears the grid, spawns the first piece and
//!    schedules gravity ticks at the level 1 interval
//! 2. Each tick moves the falling piece down one row
//! 3. A piece that cannot move down is locked, full rows are cleared and the
//!    lookahead piece spawns
//! 4. When the level changes the tick source is rescheduled at the new
//!    interval right away
//! 5. The game ends when a freshly spawned piece collides
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameSession, PieceSeed, StepOutcome};
//!
//! let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
//! let mut session = GameSession::with_seed(seed);
//! session.start(&mut ());
//!
//! // Without input, pieces pile up until one cannot spawn.
//! loop {
//!     if let StepOutcome::ToppedOut { .. } = session.tick(&mut ()) {
//!         break;
//!     }
//! }
//! assert!(session.state().is_game_over());
//! ```

pub use self::{
    command::*, game_session::*, game_stats::*, piece_buffer::*, piece_generator::*,
    tick_scheduler::*,
};

mod command;
mod game_session;
mod game_stats;
mod piece_buffer;
mod piece_generator;
mod tick_scheduler;
