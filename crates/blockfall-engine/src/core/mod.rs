pub use self::{grid::*, piece::*};

pub(crate) mod grid;
pub(crate) mod piece;
