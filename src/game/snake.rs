use std::collections::{HashSet, VecDeque};

use super::direction::Direction;
use super::draw::{Drawable, Rgb};
use super::grid::Cell;

/// The player's snake
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
    /// Direction committed for the next move
    direction: Direction,
    /// Latest accepted turn request, applied at the start of the next tick
    pending_direction: Option<Direction>,
    /// Length the body is trimmed back to after each move
    target_length: usize,
    color: Rgb,
}

impl Snake {
    /// Create a length-1 snake
    pub fn new(head: Cell, direction: Direction, color: Rgb) -> Self {
        Self::with_tail(head, std::iter::empty(), direction, color)
    }

    /// Create a snake from its head and the segments behind it, nearest
    /// first. The target length is the number of segments.
    pub fn with_tail(
        head: Cell,
        tail: impl IntoIterator<Item = Cell>,
        direction: Direction,
        color: Rgb,
    ) -> Self {
        let mut body = VecDeque::from([head]);
        body.extend(tail);

        Self {
            target_length: body.len(),
            body,
            direction,
            pending_direction: None,
            color,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Queue a turn for the next tick.
    ///
    /// A request opposite to the committed direction is ignored and `false`
    /// is returned. Otherwise it replaces any earlier request from the same
    /// tick.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Commit the queued turn, if any
    pub fn apply_pending_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    /// Check if `cell` is covered by any segment, tail included
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Add a new head and drop tail segments beyond the target length
    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
        self.body.truncate(self.target_length);
    }

    /// Raise the target length by one segment
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl Drawable for Snake {
    fn cells(&self) -> Vec<(Cell, Rgb)> {
        self.body.iter().map(|&cell| (cell, self.color)).collect()
    }
}
