use crate::CellOutOfBoundsError;

use super::piece::{Piece, PieceKind};

/// Number of rows in the grid.
pub const ROWS: usize = 20;
/// Number of columns in the grid.
pub const COLS: usize = 10;

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const ROWS_I32: i32 = ROWS as i32;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const COLS_I32: i32 = COLS as i32;

/// A single cell of the grid.
///
/// Locked cells remember which piece kind they came from, which renderers use
/// as the cell colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Block {
    #[default]
    Empty,
    Piece(PieceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridRow {
    cells: [Block; COLS],
}

impl GridRow {
    const EMPTY: Self = Self {
        cells: [Block::Empty; COLS],
    };

    fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }
}

/// Fixed-size store of locked blocks.
///
/// Row 0 is the top of the visible area and row `ROWS - 1` the bottom. The
/// space above row 0 (negative `y`) is open: it never blocks a piece and can
/// never hold a block.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, PieceKind};
///
/// let mut grid = Grid::EMPTY;
/// grid.occupy(0, 19, PieceKind::I).unwrap();
///
/// assert!(grid.is_occupied(0, 19));
/// assert!(grid.is_occupied(-1, 5)); // left wall
/// assert!(!grid.is_occupied(3, -2)); // above the grid
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [GridRow; ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const ROWS: usize = ROWS;
    pub const COLS: usize = COLS;

    pub const EMPTY: Self = Self {
        rows: [GridRow::EMPTY; ROWS],
    };

    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|x| *x < COLS)?;
        let y = usize::try_from(y).ok().filter(|y| *y < ROWS)?;
        Some((x, y))
    }

    /// Returns whether `(x, y)` blocks a piece cell.
    ///
    /// Columns outside `[0, COLS)` and rows at or below `ROWS` are always
    /// blocked. Rows above the grid (`y < 0`) are never blocked.
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if !(0..COLS_I32).contains(&x) || y >= ROWS_I32 {
            return true;
        }
        if y < 0 {
            return false;
        }
        Self::index(x, y).is_some_and(|(x, y)| !self.rows[y].cells[x].is_empty())
    }

    /// Returns the block stored at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Block> {
        Self::index(x, y).map(|(x, y)| self.rows[y].cells[x])
    }

    /// Records a locked block at `(x, y)`.
    ///
    /// Cells above the grid cannot be written; the grid is left untouched and
    /// an error is returned for them and for any other out-of-range cell.
    pub fn occupy(&mut self, x: i32, y: i32, kind: PieceKind) -> Result<(), CellOutOfBoundsError> {
        let (col, row) = Self::index(x, y).ok_or(CellOutOfBoundsError { x, y })?;
        self.rows[row].cells[col] = Block::Piece(kind);
        Ok(())
    }

    /// Merges every cell of `piece` that lies inside the grid.
    ///
    /// Returns the number of cells written. Cells with negative `y` are dropped.
    pub fn fill_piece(&mut self, piece: &Piece) -> usize {
        piece
            .occupied_cells()
            .into_iter()
            .filter(|&(x, y)| self.occupy(x, y, piece.kind()).is_ok())
            .count()
    }

    /// Returns whether every cell of `row` is occupied.
    ///
    /// Rows outside the grid are never full.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(GridRow::is_full)
    }

    /// Removes `row` and inserts an empty row at the top.
    ///
    /// Rows above the removed one shift down by one; rows below are untouched.
    pub fn clear_row(&mut self, row: usize) {
        if row >= ROWS {
            return;
        }
        self.rows[..=row].rotate_right(1);
        self.rows[0] = GridRow::EMPTY;
    }

    /// Clears every full row and returns how many were removed.
    ///
    /// Rows are scanned from the bottom up. After a clear the same row index is
    /// checked again, since the row that just shifted into it may be full too.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = ROWS;
        while row > 0 {
            if self.is_row_full(row - 1) {
                self.clear_row(row - 1);
                cleared += 1;
            } else {
                row -= 1;
            }
        }
        cleared
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; COLS]> {
        self.rows.iter().map(|row| &row.cells)
    }

    /// Builds a grid from ASCII art, for fixtures and tests.
    ///
    /// `#` is an occupied cell and `.` an empty one; other characters are
    /// ignored. Rows are listed top to bottom and aligned to the bottom of the
    /// grid, so a fixture only needs to spell out the rows it cares about.
    /// Occupied cells are marked as `I` blocks.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have exactly `COLS` cells or if there are more
    /// than `ROWS` rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut grid = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= ROWS,
            "At most {ROWS} rows are allowed, got {}",
            lines.len()
        );

        let offset = ROWS - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                cells.len(),
                COLS,
                "Each row must have exactly {COLS} cells, got {} at row {i}",
                cells.len()
            );
            for (x, &c) in cells.iter().enumerate() {
                if c == '#' {
                    grid.rows[offset + i].cells[x] = Block::Piece(PieceKind::I);
                }
            }
        }
        grid
    }
}
