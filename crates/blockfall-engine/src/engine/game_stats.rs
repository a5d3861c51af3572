use std::time::Duration;

/// Base points for line clears, indexed by the number of lines cleared at once.
///
/// The awarded amount is multiplied by the level in effect before the clear.
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Lines needed to advance one level.
const LINES_PER_LEVEL: usize = 10;

const BASE_DROP_INTERVAL_MS: u64 = 1000;
const DROP_INTERVAL_STEP_MS: u64 = 100;
const MIN_DROP_INTERVAL_MS: u64 = 100;

/// Points per row for a soft drop.
pub const SOFT_DROP_POINTS: usize = 1;
/// Points per row for a hard drop.
pub const HARD_DROP_POINTS: usize = 2;

/// Returns the gravity interval for `level`.
///
/// Starts at 1000 ms on level 1 and shrinks by 100 ms per level, never going
/// below 100 ms.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use blockfall_engine::drop_interval_for_level;
///
/// assert_eq!(drop_interval_for_level(1), Duration::from_millis(1000));
/// assert_eq!(drop_interval_for_level(2), Duration::from_millis(900));
/// assert_eq!(drop_interval_for_level(42), Duration::from_millis(100));
/// ```
#[must_use]
pub fn drop_interval_for_level(level: usize) -> Duration {
    let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
    let millis = BASE_DROP_INTERVAL_MS
        .saturating_sub(steps.saturating_mul(DROP_INTERVAL_STEP_MS))
        .max(MIN_DROP_INTERVAL_MS);
    Duration::from_millis(millis)
}

/// Session counters read by the score panel.
///
/// - **Score**: line clears plus soft/hard drop bonuses
/// - **Level**: `lines / 10 + 1`
/// - **Drop interval**: derived from the level
/// - **Completed pieces** and a histogram of how many lines each lock cleared
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.cleared_lines(), 4);
/// assert_eq!(stats.level(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    cleared_lines: usize,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            cleared_lines: 0,
            completed_pieces: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Total lines cleared in this session.
    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.cleared_lines / LINES_PER_LEVEL + 1
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        drop_interval_for_level(self.level())
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Number of locks that cleared 0, 1, 2, 3 and 4 lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Adds drop bonus points.
    pub const fn add_drop_points(&mut self, points: usize) {
        self.score += points;
    }

    /// Records a locked piece that cleared `cleared_lines` rows.
    ///
    /// Returns the points awarded for the clear.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        let bucket = cleared_lines.min(SCORE_TABLE.len() - 1);
        let points = SCORE_TABLE[bucket] * self.level();

        self.completed_pieces += 1;
        self.line_cleared_counter[bucket] += 1;
        self.score += points;
        self.cleared_lines += cleared_lines;
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with_lines(lines: usize) -> GameStats {
        GameStats {
            cleared_lines: lines,
            ..GameStats::new()
        }
    }

    #[test]
    fn test_line_clear_points_at_level_one() {
        for (lines, expected) in [(0, 0), (1, 100), (2, 300), (3, 500), (4, 800)] {
            let mut stats = GameStats::new();
            assert_eq!(stats.complete_piece_drop(lines), expected);
            assert_eq!(stats.score(), expected);
        }
    }

    #[test]
    fn test_points_scale_with_level() {
        let mut stats = stats_with_lines(20);
        assert_eq!(stats.level(), 3);
        assert_eq!(stats.complete_piece_drop(2), 900);
    }

    #[test]
    fn test_points_use_level_before_clear() {
        let mut stats = stats_with_lines(9);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.complete_piece_drop(4), 800);
        assert_eq!(stats.level(), 2);
    }

    #[test]
    fn test_level_and_interval_progression() {
        let stats = stats_with_lines(9);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.drop_interval(), Duration::from_millis(1000));

        let stats = stats_with_lines(10);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.drop_interval(), Duration::from_millis(900));

        let stats = stats_with_lines(95);
        assert_eq!(stats.level(), 10);
        assert_eq!(stats.drop_interval(), Duration::from_millis(100));

        let stats = stats_with_lines(500);
        assert_eq!(stats.level(), 51);
        assert_eq!(stats.drop_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_counters() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(0);
        stats.complete_piece_drop(1);
        stats.complete_piece_drop(1);
        stats.complete_piece_drop(4);
        stats.add_drop_points(7);

        assert_eq!(stats.completed_pieces(), 4);
        assert_eq!(stats.cleared_lines(), 6);
        assert_eq!(stats.line_cleared_counter(), &[1, 2, 0, 0, 1]);
        assert_eq!(stats.score(), 100 + 100 + 800 + 7);
    }
}
