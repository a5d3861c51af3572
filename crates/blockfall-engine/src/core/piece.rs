use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::grid::{COLS, Grid};

/// A falling piece: shape, colour and anchor position.
///
/// The anchor is the top-left corner of the shape's bounding box, in grid
/// coordinates. `y` may be negative while the piece is spawning or rotating
/// near the top edge.
///
/// `Piece` is plain data. All movement goes through [`Piece::try_move`] and
/// [`Piece::try_rotate`], which check the candidate against a [`Grid`] and only
/// commit it when it fits.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, Piece, PieceKind};
///
/// let grid = Grid::EMPTY;
/// let mut piece = Piece::new(PieceKind::T);
///
/// assert!(piece.try_move(&grid, 1, 0));
/// assert!(piece.try_rotate(&grid));
/// assert!(piece.try_move(&grid, 0, -20)); // far above the grid is fine...
/// assert!(!piece.try_move(&grid, 10, 0)); // ...but the right wall is not
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece in its spawn orientation, horizontally centred at `y = 0`.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        let shape = kind.shape();
        Self {
            kind,
            shape,
            position: PiecePosition::spawn(shape),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns the grid coordinates covered by the piece.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(i32, i32), 16> {
        self.shape
            .occupied_offsets()
            .map(|(dx, dy)| (self.position.x + dx, self.position.y + dy))
            .collect()
    }

    /// Returns whether the piece overlaps a wall, the floor or a locked block.
    #[must_use]
    pub fn collides(&self, grid: &Grid) -> bool {
        self.occupied_cells()
            .into_iter()
            .any(|(x, y)| grid.is_occupied(x, y))
    }

    /// Returns a copy of the piece shifted by `(dx, dy)`, without any checks.
    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: PiecePosition {
                x: self.position.x + dx,
                y: self.position.y + dy,
            },
            ..*self
        }
    }

    /// Returns a copy of the piece rotated 90° clockwise in place, without any checks.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_clockwise(),
            ..*self
        }
    }

    /// Moves the piece by `(dx, dy)` if the result does not collide.
    ///
    /// Returns `false` and leaves the piece untouched otherwise.
    pub fn try_move(&mut self, grid: &Grid, dx: i32, dy: i32) -> bool {
        self.try_replace(grid, self.translated(dx, dy))
    }

    /// Rotates the piece clockwise if the rotated shape fits at the current position.
    ///
    /// There are no wall kicks: a rotation blocked by a wall or by locked
    /// blocks simply fails and the original shape is kept.
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        self.try_replace(grid, self.rotated())
    }

    fn try_replace(&mut self, grid: &Grid, candidate: Self) -> bool {
        if candidate.collides(grid) {
            return false;
        }
        *self = candidate;
        true
    }
}

/// Anchor position of a piece in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn spawn(shape: Shape) -> Self {
        let x = COLS / 2 - usize::from(shape.width()) / 2;
        Self {
            x: i32::try_from(x).unwrap_or_default(),
            y: 0,
        }
    }

    #[must_use]
    pub fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(self) -> i32 {
        self.y
    }
}

/// Boolean occupancy matrix of a piece, at most 4×4.
///
/// Only the top-left `width × height` part of `cells` is meaningful; the rest
/// stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; 4]; 4],
}

impl Shape {
    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns whether the cell at column `x`, row `y` of the matrix is filled.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < usize::from(self.width) && y < usize::from(self.height) && self.cells[y][x]
    }

    /// Returns the `(dx, dy)` offsets of the filled cells, row by row.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height).flat_map(move |dy| {
            (0..self.width)
                .filter(move |&dx| self.cells[usize::from(dy)][usize::from(dx)])
                .map(move |dx| (i32::from(dx), i32::from(dy)))
        })
    }

    /// Rotates the matrix 90° clockwise (transpose, then reverse each row).
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        let width = self.height as usize;
        let height = self.width as usize;
        let mut cells = [[false; 4]; 4];
        let mut y = 0;
        while y < height {
            let mut x = 0;
            while x < width {
                cells[y][x] = self.cells[width - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// The seven piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    #[display("I")]
    I = 0,
    #[display("O")]
    O = 1,
    #[display("T")]
    T = 2,
    #[display("S")]
    S = 3,
    #[display("Z")]
    Z = 4,
    #[display("J")]
    J = 5,
    #[display("L")]
    L = 6,
}

/// Uniform draw over all seven kinds.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the spawn-orientation shape of this kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        PIECE_SHAPES[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('S'), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

const PIECE_SHAPES: [Shape; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];

    const fn s(width: u8, height: u8, cells: [[bool; 4]; 4]) -> Shape {
        Shape {
            width,
            height,
            cells,
        }
    }

    [
        // I-piece
        s(4, 1, [[C, C, C, C], EEEE, EEEE, EEEE]),
        // O-piece
        s(2, 2, [[C, C, E, E], [C, C, E, E], EEEE, EEEE]),
        // T-piece
        s(3, 2, [[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
        // S-piece
        s(3, 2, [[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // Z-piece
        s(3, 2, [[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
        // J-piece
        s(3, 2, [[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        // L-piece
        s(3, 2, [[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::{COLS_I32, ROWS_I32};

    fn cells(piece: &Piece) -> Vec<(i32, i32)> {
        let mut cells = piece.occupied_cells().to_vec();
        cells.sort_unstable();
        cells
    }

    fn render(shape: &Shape) -> Vec<String> {
        (0..usize::from(shape.height()))
            .map(|y| {
                (0..usize::from(shape.width()))
                    .map(|x| if shape.is_occupied(x, y) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().occupied_offsets().count(), 4, "{kind}");
        }
    }

    #[test]
    fn test_spawn_position_is_centred() {
        assert_eq!(Piece::new(PieceKind::I).position(), PiecePosition::new(3, 0));
        assert_eq!(Piece::new(PieceKind::O).position(), PiecePosition::new(4, 0));
        for kind in [
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::J,
            PieceKind::L,
        ] {
            assert_eq!(Piece::new(kind).position(), PiecePosition::new(4, 0));
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let shape = PieceKind::T.shape();
        assert_eq!(render(&shape), [".#.", "###"]);

        let shape = shape.rotated_clockwise();
        assert_eq!(render(&shape), ["#.", "##", "#."]);

        let shape = shape.rotated_clockwise();
        assert_eq!(render(&shape), ["###", ".#."]);

        let shape = shape.rotated_clockwise();
        assert_eq!(render(&shape), [".#", "##", ".#"]);

        assert_eq!(shape.rotated_clockwise(), PieceKind::T.shape());
    }

    #[test]
    fn test_rotate_i_and_o() {
        let i = PieceKind::I.shape().rotated_clockwise();
        assert_eq!(render(&i), ["#", "#", "#", "#"]);

        let o = PieceKind::O.shape();
        assert_eq!(o.rotated_clockwise(), o);
    }

    #[test]
    fn test_collides_matches_grid_rule() {
        let grid = Grid::from_ascii(
            r"
            ....#.....
            ",
        );

        for kind in PieceKind::ALL {
            let mut shape = kind.shape();
            for _ in 0..4 {
                for x in -4..COLS_I32 + 4 {
                    for y in -4..ROWS_I32 + 4 {
                        let piece = Piece {
                            kind,
                            shape,
                            position: PiecePosition::new(x, y),
                        };
                        let expected = piece.occupied_cells().iter().any(|&(cx, cy)| {
                            !(0..COLS_I32).contains(&cx)
                                || cy >= ROWS_I32
                                || (cy >= 0 && grid.is_occupied(cx, cy))
                        });
                        assert_eq!(piece.collides(&grid), expected, "{kind} at ({x}, {y})");
                    }
                }
                shape = shape.rotated_clockwise();
            }
        }
    }

    #[test]
    fn test_above_grid_only_checks_walls() {
        let grid = Grid::from_ascii(&"##########\n".repeat(20));
        let piece = Piece::new(PieceKind::O).translated(0, -2);
        assert!(!piece.collides(&grid));
        assert!(piece.translated(-5, 0).collides(&grid));
        assert!(piece.translated(0, 1).collides(&grid));
    }

    #[test]
    fn test_failed_move_keeps_position() {
        let grid = Grid::EMPTY;
        let mut piece = Piece::new(PieceKind::L);

        while piece.try_move(&grid, -1, 0) {}
        let at_wall = piece;
        assert_eq!(at_wall.position().x(), 0);

        assert!(!piece.try_move(&grid, -1, 0));
        assert_eq!(piece, at_wall);

        while piece.try_move(&grid, 0, 1) {}
        let landed = piece;
        assert_eq!(cells(&landed).iter().map(|c| c.1).max(), Some(ROWS_I32 - 1));
        assert!(!piece.try_move(&grid, 0, 1));
        assert_eq!(piece, landed);
    }

    #[test]
    fn test_rotation_blocked_by_wall_keeps_shape() {
        let grid = Grid::EMPTY;
        // Vertical I against the right wall: rotating back to horizontal would
        // stick out three columns.
        let mut piece = Piece::new(PieceKind::I).rotated().translated(6, 5);
        assert!(!piece.collides(&grid));
        assert_eq!(piece.position().x(), COLS_I32 - 1);

        let before = piece;
        assert!(!piece.try_rotate(&grid));
        assert_eq!(piece, before);
        assert!(!piece.collides(&grid));
    }

    #[test]
    fn test_rotation_blocked_by_stack_keeps_shape() {
        let grid = Grid::from_ascii(
            r"
            .....#....
            ..........
            ",
        );
        // Horizontal I above the stack: its vertical form would reach into the
        // occupied cell.
        let mut piece = Piece::new(PieceKind::I).translated(2, 15);
        assert!(!piece.collides(&grid));

        let before = piece;
        assert!(!piece.try_rotate(&grid));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_rotation_near_top_may_go_above_grid() {
        let grid = Grid::EMPTY;
        let mut piece = Piece::new(PieceKind::I).translated(0, -1);
        assert!(piece.try_rotate(&grid));
        assert_eq!(piece.shape().height(), 4);
        assert!(cells(&piece).iter().any(|&(_, y)| y < 0));
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
            assert_eq!(kind.to_string(), kind.as_char().to_string());
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }
}
