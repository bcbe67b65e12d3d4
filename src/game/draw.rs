use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// A plain 24-bit colour, independent of any rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Anything that occupies coloured cells on the board.
///
/// The renderer only sees this trait, so snakes and apples are drawn
/// without sharing a common base type.
pub trait Drawable {
    fn cells(&self) -> Vec<(Cell, Rgb)>;
}
