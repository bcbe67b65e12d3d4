use super::apple::Apple;
use super::snake::Snake;

/// Where the game currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// The snake ran into itself; only a reset leaves this phase
    GameOver,
    /// The snake covers the whole board
    Won,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub snake: Snake,
    pub apple: Apple,
    pub phase: Phase,
    /// Ticks since the last reset
    pub ticks: u64,
}

impl SimulationState {
    pub fn new(snake: Snake, apple: Apple) -> Self {
        Self {
            snake,
            apple,
            phase: Phase::Running,
            ticks: 0,
        }
    }

    /// Apples eaten in the current game
    pub fn score(&self) -> u32 {
        (self.snake.len() - 1) as u32
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, Rgb};

    #[test]
    fn test_score_counts_extra_segments() {
        let snake = Snake::with_tail(
            Cell::new(3, 3),
            [Cell::new(2, 3), Cell::new(1, 3)],
            Direction::Right,
            Rgb::new(0, 255, 0),
        );
        let state = SimulationState::new(snake, Apple::new(Cell::new(0, 0), Rgb::new(255, 0, 0)));

        assert_eq!(state.score(), 2);
        assert!(state.is_running());
        assert_eq!(state.ticks, 0);
    }
}
