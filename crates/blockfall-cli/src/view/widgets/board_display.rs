use std::iter;

use blockfall_engine::{COLS, Grid, Piece, ROWS};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::BlockDisplay;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    falling_piece: Option<Piece>,
    show_dots: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            falling_piece: None,
            show_dots: true,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: Option<Piece>) -> Self {
        Self {
            falling_piece: piece,
            ..self
        }
    }

    pub fn show_dots(self, show_dots: bool) -> Self {
        Self { show_dots, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        COLS as u16 * BlockDisplay::width() + super::chrome_size(self.block.as_ref()).0
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS as u16 * BlockDisplay::height() + super::chrome_size(self.block.as_ref()).1
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut grid = self.grid.clone();
        if let Some(piece) = &self.falling_piece {
            grid.fill_piece(piece);
        }

        let col_constraints = (0..COLS).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..ROWS).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<ROWS>(&vertical)
            .into_iter()
            .map(|row| row.layout::<COLS>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, grid.rows()) {
            for (grid_cell, block) in iter::zip(grid_row, row) {
                BlockDisplay::from_block(*block, self.show_dots).render(grid_cell, buf);
            }
        }
    }
}
