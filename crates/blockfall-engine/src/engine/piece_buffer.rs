use crate::{Piece, PieceGenerator, PieceSeed};

/// One-piece lookahead in front of a [`PieceGenerator`].
///
/// Once created the buffer always holds exactly one upcoming piece. Taking it
/// with [`Self::pop_next`] immediately draws its replacement, so the preview
/// panel always has something to show.
///
/// # Example
///
/// ```
/// use blockfall_engine::PieceBuffer;
///
/// let mut buffer = PieceBuffer::new();
/// let upcoming = *buffer.next_piece();
/// let current = buffer.pop_next();
///
/// assert_eq!(current, upcoming);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBuffer {
    generator: PieceGenerator,
    next: Piece,
}

impl Default for PieceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBuffer {
    /// Creates a buffer backed by a randomly seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::from_generator(PieceGenerator::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_generator(PieceGenerator::with_seed(seed))
    }

    fn from_generator(mut generator: PieceGenerator) -> Self {
        let next = generator.next_piece();
        Self { generator, next }
    }

    /// Returns the upcoming piece without taking it.
    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    /// Takes the upcoming piece and draws a new one in its place.
    pub fn pop_next(&mut self) -> Piece {
        let next = self.generator.next_piece();
        std::mem::replace(&mut self.next, next)
    }

    /// Discards the upcoming piece and draws a fresh one.
    ///
    /// Used when a new game starts, so the first preview is not a leftover of
    /// the previous game.
    pub fn reset(&mut self) {
        self.next = self.generator.next_piece();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> PieceSeed {
        "0f1e2d3c4b5a69788796a5b4c3d2e1f0".parse().unwrap()
    }

    #[test]
    fn test_pop_returns_previewed_piece() {
        let mut buffer = PieceBuffer::with_seed(seed());
        for _ in 0..20 {
            let preview = *buffer.next_piece();
            assert_eq!(buffer.pop_next(), preview);
        }
    }

    #[test]
    fn test_follows_generator_sequence() {
        let mut generator = PieceGenerator::with_seed(seed());
        let mut buffer = PieceBuffer::with_seed(seed());
        for _ in 0..20 {
            assert_eq!(buffer.pop_next(), generator.next_piece());
        }
    }

    #[test]
    fn test_reset_skips_one_piece() {
        let mut generator = PieceGenerator::with_seed(seed());
        let mut buffer = PieceBuffer::with_seed(seed());

        let _discarded = generator.next_piece();
        buffer.reset();
        assert_eq!(buffer.pop_next(), generator.next_piece());
    }
}
