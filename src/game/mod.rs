//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it one tick at a time, and tests drive it directly.

pub mod apple;
pub mod config;
pub mod direction;
pub mod draw;
pub mod engine;
pub mod grid;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use apple::{Apple, BoardFull};
pub use config::{GameConfig, Palette};
pub use direction::Direction;
pub use draw::{Drawable, Rgb};
pub use engine::{AppleOnSnake, SnakeSimulation, StepResult};
pub use grid::{Cell, Grid};
pub use snake::Snake;
pub use state::{Phase, SimulationState};
