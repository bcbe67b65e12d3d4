use std::collections::HashSet;
use std::fmt;

use log::warn;
use rand::Rng;
use rand::seq::IteratorRandom;

use super::draw::{Drawable, Rgb};
use super::grid::{Cell, Grid};

/// Rejection-sampling draws allowed per board cell before falling back to a
/// scan of the free cells
const SAMPLES_PER_CELL: usize = 4;

/// Every cell of the board is occupied, so there is nowhere to put the apple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFull;

impl fmt::Display for BoardFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no free cell left on the board")
    }
}

impl std::error::Error for BoardFull {}

#[derive(Debug, Clone, PartialEq)]
pub struct Apple {
    position: Cell,
    color: Rgb,
}

impl Apple {
    pub fn new(position: Cell, color: Rgb) -> Self {
        Self { position, color }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Move the apple to a uniformly random cell not in `occupied`.
    ///
    /// Samples random cells until a free one comes up. On a crowded board
    /// the sampling is cut off after a few draws per cell and the new spot
    /// is picked among the remaining free cells instead. If there are none
    /// the position is left as is.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> Result<Cell, BoardFull> {
        for _ in 0..grid.capacity() * SAMPLES_PER_CELL {
            let x = rng.gen_range(0..grid.width()) as i32;
            let y = rng.gen_range(0..grid.height()) as i32;
            let cell = Cell::new(x, y);

            if !occupied.contains(&cell) {
                self.position = cell;
                return Ok(cell);
            }
        }

        warn!(
            "apple sampling gave up after {} draws ({} of {} cells occupied)",
            grid.capacity() * SAMPLES_PER_CELL,
            occupied.len(),
            grid.capacity()
        );

        let cell = grid
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .choose(rng)
            .ok_or(BoardFull)?;
        self.position = cell;
        Ok(cell)
    }
}

impl Drawable for Apple {
    fn cells(&self) -> Vec<(Cell, Rgb)> {
        vec![(self.position, self.color)]
    }
}
