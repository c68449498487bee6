use super::{centered_rect, snake_color, View};
use crate::app::AppCommand;
use crate::render::arena::ArenaRenderer;
use crate::render::standard_renderer::StandardRenderer;
use crate::render::types::{CharDimensions, CharGrid, RenderConfig, Tint};
use common::{in_bounds, GameSnapshot, Position, GRID_HEIGHT, GRID_WIDTH, SNAKE_NAMES};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::cell::Cell;

const FOOD_COLOR: Color = Color::Rgb(0xf8, 0x71, 0x71);

/// Main screen: scoreboard, arena and the start/game-over overlay.
pub struct BoardViewState {
    config: RenderConfig,
    renderer: ArenaRenderer<StandardRenderer>,
    // Inner arena area from the last frame, for mapping clicks to cells
    arena_area: Cell<Rect>,
}

impl Default for BoardViewState {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl BoardViewState {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            renderer: ArenaRenderer::new(StandardRenderer::new(config.chars_per_point)),
            arena_area: Cell::new(Rect::default()),
        }
    }

    pub fn arena_area(&self) -> Rect {
        self.arena_area.get()
    }

    pub fn set_arena_area(&self, area: Rect) {
        self.arena_area.set(area);
    }

    fn render_header(&self, snapshot: &GameSnapshot) -> Paragraph<'static> {
        let mut spans = vec![Span::styled(
            "Snake Battle  ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )];

        for (snake_id, snake) in snapshot.snakes.iter().enumerate() {
            let name = SNAKE_NAMES.get(snake_id).copied().unwrap_or("?");
            spans.push(Span::styled(
                format!("■ {} {}  ", name, snake.score),
                Style::default()
                    .fg(snake_color(&snake.color))
                    .add_modifier(Modifier::BOLD),
            ));
        }

        spans.push(Span::styled(
            format!("Speed: {}  Tick: {}", snapshot.speed, snapshot.tick),
            Style::default().fg(Color::Gray),
        ));

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn arena_lines(&self, grid: &CharGrid, snapshot: &GameSnapshot) -> Vec<Line<'static>> {
        grid.rows()
            .iter()
            .map(|row| {
                let mut spans: Vec<Span<'static>> = Vec::new();
                let mut run = String::new();
                let mut run_tint = None;

                for cell in row {
                    if run_tint != Some(cell.tint) && !run.is_empty() {
                        let tint = run_tint.unwrap_or(Tint::Background);
                        spans.push(Span::styled(std::mem::take(&mut run), tint_style(tint, snapshot)));
                    }
                    run_tint = Some(cell.tint);
                    run.push(cell.ch);
                }
                if !run.is_empty() {
                    let tint = run_tint.unwrap_or(Tint::Background);
                    spans.push(Span::styled(run, tint_style(tint, snapshot)));
                }

                Line::from(spans)
            })
            .collect()
    }

    fn render_overlay(&self, frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
        let mut lines = Vec::new();
        if let Some(cause) = snapshot.game_over {
            lines.push(Line::from(Span::styled(
                format!("Game over: {}", cause),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            let scores = snapshot
                .scores()
                .iter()
                .enumerate()
                .map(|(id, score)| format!("{} {}", SNAKE_NAMES.get(id).copied().unwrap_or("?"), score))
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(Line::from(scores));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "Press Enter to start the battle",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));

        let popup = centered_rect(area, 44, lines.len() as u16 + 2);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            popup,
        );
    }
}

fn tint_style(tint: Tint, snapshot: &GameSnapshot) -> Style {
    match tint {
        Tint::Background => Style::default().fg(Color::DarkGray),
        Tint::Food => Style::default().fg(FOOD_COLOR),
        Tint::Snake(snake_id) => snapshot
            .snakes
            .get(snake_id)
            .map(|snake| Style::default().fg(snake_color(&snake.color)))
            .unwrap_or_default(),
    }
}

/// Maps a terminal cell inside the arena's inner area to a grid position.
pub fn cell_at(inner: Rect, dims: CharDimensions, column: u16, row: u16) -> Option<Position> {
    let inside = column >= inner.x
        && column < inner.x + inner.width
        && row >= inner.y
        && row < inner.y + inner.height;
    if !inside {
        return None;
    }

    let x = (column - inner.x) as usize / dims.horizontal;
    let y = (row - inner.y) as usize / dims.vertical;
    if x >= GRID_WIDTH as usize || y >= GRID_HEIGHT as usize {
        return None;
    }

    let position = Position::new(x as i16, y as i16);
    in_bounds(&position).then_some(position)
}

impl View for BoardViewState {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(AppCommand::StartGame),
            KeyCode::Char('o') => Some(AppCommand::OpenOptions),
            KeyCode::Char('q') | KeyCode::Esc => Some(AppCommand::Quit),
            _ => None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<AppCommand> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        cell_at(
            self.arena_area.get(),
            self.config.chars_per_point,
            mouse.column,
            mouse.row,
        )
        .map(AppCommand::PlaceFood)
    }

    fn render(&self, frame: &mut Frame, snapshot: &GameSnapshot) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(2), // Scoreboard
                Constraint::Min(10),   // Arena
                Constraint::Length(1), // Controls help
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(snapshot), chunks[0]);

        let grid = self.renderer.render(snapshot, &self.config);
        let outer = centered_rect(
            chunks[1],
            grid.physical_width() as u16 + 2,
            grid.physical_height() as u16 + 2,
        );
        let block = Block::default().borders(Borders::ALL).title(" Arena ");
        let inner = block.inner(outer);
        self.arena_area.set(inner);

        frame.render_widget(Paragraph::new(self.arena_lines(&grid, snapshot)).block(block), outer);

        if !snapshot.is_running {
            self.render_overlay(frame, outer, snapshot);
        }

        let help = Paragraph::new("Enter: start   o: options   click: move food   q: quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[2]);
    }
}
