use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, SnakeSimulation, StepResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-driven game in the terminal.
///
/// Owns the simulation and feeds it one tick per timer interval; turn
/// requests collected between ticks are queued on the snake, so the last
/// one before a tick wins.
pub struct HumanMode {
    sim: SnakeSimulation,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let renderer = Renderer::new(&config);

        Self {
            sim: SnakeSimulation::new(config),
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.sim.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            self.sim.grid(),
                            self.sim.state(),
                            &self.sim.drawables(),
                            &self.metrics,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(
                    "quitting after {} games, best score {}",
                    self.metrics.games_played, self.metrics.high_score
                );
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                if self.sim.state().is_running() && !self.metrics.is_paused() {
                    self.sim.request_direction(direction);
                }
            }
            KeyAction::Pause => self.toggle_pause(),
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn toggle_pause(&mut self) {
        if !self.sim.state().is_running() {
            return;
        }
        if self.metrics.is_paused() {
            self.metrics.on_resume();
        } else {
            self.metrics.on_pause();
        }
    }

    fn update_game(&mut self) {
        if !self.sim.state().is_running() || self.metrics.is_paused() {
            return;
        }

        match self.sim.step() {
            StepResult::Continued | StepResult::AteApple => {}
            StepResult::Collided => {
                self.metrics.on_game_over(self.sim.state().score());
                if self.sim.config().auto_restart {
                    self.reset_game();
                }
            }
            StepResult::BoardFull => {
                self.metrics.on_game_over(self.sim.state().score());
            }
        }
    }

    fn reset_game(&mut self) {
        self.sim.reset();
        self.metrics.on_game_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Apple, Cell, Direction, Phase, Snake};

    fn seeded_config() -> GameConfig {
        let mut config = GameConfig::small();
        config.seed = Some(3);
        config
    }

    fn curled_snake(config: &GameConfig) -> Snake {
        let tail = [(1, 2), (1, 1), (2, 1)].map(Cell::from);
        Snake::with_tail(Cell::new(2, 2), tail, Direction::Up, config.colors.snake)
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default());
        assert!(mode.sim.state().is_running());
        assert_eq!(mode.sim.state().score(), 0);
    }

    #[test]
    fn test_collision_auto_restarts() {
        let config = seeded_config();
        let mut mode = HumanMode::new(config.clone());
        let apple = Apple::new(Cell::new(8, 8), config.colors.apple);
        mode.sim.set_position(curled_snake(&config), apple).unwrap();

        mode.update_game();

        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.high_score, 3);
        assert!(mode.sim.state().is_running());
        assert_eq!(mode.sim.state().snake.len(), 1);
    }

    #[test]
    fn test_collision_waits_for_restart() {
        let mut config = seeded_config();
        config.auto_restart = false;
        let mut mode = HumanMode::new(config.clone());
        let apple = Apple::new(Cell::new(8, 8), config.colors.apple);
        mode.sim.set_position(curled_snake(&config), apple).unwrap();

        mode.update_game();
        assert_eq!(mode.sim.state().phase, Phase::GameOver);

        // Further ticks do nothing
        mode.update_game();
        assert_eq!(mode.metrics.games_played, 1);

        mode.handle_action(KeyAction::Restart);
        assert!(mode.sim.state().is_running());
    }

    #[test]
    fn test_pause_stops_ticks() {
        let mut mode = HumanMode::new(seeded_config());
        let head = mode.sim.state().snake.head();

        mode.handle_action(KeyAction::Pause);
        mode.update_game();
        assert_eq!(mode.sim.state().snake.head(), head);

        // Turns are ignored while paused
        mode.handle_action(KeyAction::Turn(Direction::Up));
        assert_eq!(mode.sim.state().snake.pending_direction(), None);

        mode.handle_action(KeyAction::Pause);
        mode.update_game();
        assert_ne!(mode.sim.state().snake.head(), head);
    }

    #[test]
    fn test_quit_action() {
        let mut mode = HumanMode::new(seeded_config());
        mode.handle_action(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
