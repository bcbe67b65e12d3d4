use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Drawable, GameConfig, Grid, Palette, Phase, Rgb, SimulationState};
use crate::metrics::GameMetrics;

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Fill colour of every cell, row by row; `None` where nothing is drawn.
///
/// Later drawables paint over earlier ones.
pub fn paint_board(grid: &Grid, drawables: &[&dyn Drawable]) -> Vec<Vec<Option<Rgb>>> {
    let mut board = vec![vec![None; grid.width()]; grid.height()];
    for drawable in drawables {
        for (cell, color) in drawable.cells() {
            if grid.contains(cell) {
                board[cell.y as usize][cell.x as usize] = Some(color);
            }
        }
    }
    board
}

pub struct Renderer {
    palette: Palette,
    cell_width: u16,
}

impl Renderer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            palette: config.colors.clone(),
            cell_width: config.cell_width.max(1),
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        grid: &Grid,
        state: &SimulationState,
        drawables: &[&dyn Drawable],
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let board_area = self.board_area(chunks[1], grid);
        frame.render_widget(self.render_grid(grid, drawables), board_area);

        match state.phase {
            Phase::Running if metrics.is_paused() => {
                self.render_overlay(frame, board_area, self.render_paused());
            }
            Phase::Running => {}
            Phase::GameOver => {
                self.render_overlay(frame, board_area, self.render_game_over(state, metrics));
            }
            Phase::Won => {
                self.render_overlay(frame, board_area, self.render_win(state));
            }
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Center the board inside `area`, clipping it if the terminal is too small
    fn board_area(&self, area: Rect, grid: &Grid) -> Rect {
        let width = u16::try_from(grid.width())
            .unwrap_or(u16::MAX)
            .saturating_mul(self.cell_width)
            .saturating_add(2);
        let height = u16::try_from(grid.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2);

        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [board] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);
        board
    }

    fn render_grid(&self, grid: &Grid, drawables: &[&dyn Drawable]) -> Paragraph<'_> {
        let background = Style::default().bg(to_color(self.palette.background));
        let empty = " ".repeat(self.cell_width as usize);
        let filled = match self.cell_width {
            1 => "■".to_string(),
            width => format!("[{}]", " ".repeat(width as usize - 2)),
        };

        let lines: Vec<Line> = paint_board(grid, drawables)
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .into_iter()
                    .map(|cell| match cell {
                        Some(fill) => Span::styled(
                            filled.clone(),
                            Style::default()
                                .fg(to_color(self.palette.border))
                                .bg(to_color(fill)),
                        ),
                        None => Span::styled(empty.clone(), background),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).style(background).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(to_color(self.palette.border)))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &SimulationState, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.max(state.score()).to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.snake.len().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];
        if metrics.is_paused() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_overlay(&self, frame: &mut Frame, board: Rect, overlay: Paragraph<'_>) {
        let [row] = Layout::vertical([Constraint::Length(7)])
            .flex(Flex::Center)
            .areas(board);
        let [area] = Layout::horizontal([Constraint::Length(36)])
            .flex(Flex::Center)
            .areas(row);

        frame.render_widget(Clear, area);
        frame.render_widget(overlay, area);
    }

    fn restart_hint(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ])
    }

    fn render_game_over(&self, state: &SimulationState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            self.restart_hint(),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_win(&self, state: &SimulationState) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "BOARD CLEARED",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            self.restart_hint(),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_paused(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled("P", Style::default().fg(Color::Cyan)),
                Span::styled(" to resume", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
