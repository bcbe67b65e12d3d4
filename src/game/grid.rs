use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid, addressed by (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Toroidal board: leaving one edge re-enters from the opposite one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells on the board
    pub fn capacity(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.x < self.width as i32
            && cell.y >= 0
            && cell.y < self.height as i32
    }

    pub fn center(&self) -> Cell {
        Cell::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Move one step from `cell` in `direction`, wrapping on both axes.
    ///
    /// Uses euclidean remainder, so stepping left from column 0 lands on the
    /// last column rather than on -1.
    pub fn wrap_add(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(
            (cell.x + dx).rem_euclid(self.width as i32),
            (cell.y + dy).rem_euclid(self.height as i32),
        )
    }

    /// Every cell of the board in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_right_edge() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.wrap_add(Cell::new(4, 2), Direction::Right), Cell::new(0, 2));
    }

    #[test]
    fn test_wrap_left_edge() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.wrap_add(Cell::new(0, 3), Direction::Left), Cell::new(4, 3));
    }

    #[test]
    fn test_wrap_top_and_bottom() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.wrap_add(Cell::new(1, 0), Direction::Up), Cell::new(1, 2));
        assert_eq!(grid.wrap_add(Cell::new(1, 2), Direction::Down), Cell::new(1, 0));
    }

    #[test]
    fn test_interior_move() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.wrap_add(Cell::new(2, 2), Direction::Up), Cell::new(2, 1));
        assert_eq!(grid.wrap_add(Cell::new(2, 2), Direction::Right), Cell::new(3, 2));
    }

    #[test]
    fn test_wrap_always_in_bounds() {
        let grid = Grid::new(7, 3);
        for cell in grid.cells() {
            for dir in Direction::ALL {
                assert!(grid.contains(grid.wrap_add(cell, dir)));
            }
        }
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 20);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(19, 19)));
        assert!(!grid.contains(Cell::new(-1, 0)));
        assert!(!grid.contains(Cell::new(20, 0)));
        assert!(!grid.contains(Cell::new(0, 20)));
    }

    #[test]
    fn test_cells_and_center() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.capacity(), 6);
        assert_eq!(grid.cells().count(), 6);
        assert_eq!(grid.cells().next(), Some(Cell::new(0, 0)));
        assert_eq!(grid.cells().last(), Some(Cell::new(2, 1)));
        assert_eq!(grid.center(), Cell::new(1, 1));
    }
}
