//! Wrap Snake - the classic snake game on a wrap-around grid
//!
//! This library provides:
//! - Core game logic (game module)
//! - Terminal input mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The keyboard-driven game loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
