use super::{centered_rect, snake_color, View};
use crate::app::AppCommand;
use common::{GameSnapshot, SettingsUpdate, SnakeColor, Speed, SNAKE_COUNT, SNAKE_NAMES};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionRow {
    Speed,
    Color(usize),
}

const ROWS: [OptionRow; 1 + SNAKE_COUNT] = [OptionRow::Speed, OptionRow::Color(0), OptionRow::Color(1)];

/// Speed preset and colour pickers. Every change is sent straight to the engine.
pub struct OptionsPanelState {
    selected: usize,
    speed: Speed,
    snake_colors: [SnakeColor; SNAKE_COUNT],
}

impl OptionsPanelState {
    pub fn new(speed: Speed, snake_colors: [SnakeColor; SNAKE_COUNT]) -> Self {
        Self {
            selected: 0,
            speed,
            snake_colors,
        }
    }

    pub fn selected_row(&self) -> OptionRow {
        ROWS[self.selected]
    }

    fn change_selected(&mut self, forward: bool) -> Option<AppCommand> {
        let update = match self.selected_row() {
            OptionRow::Speed => {
                self.speed = self.speed.cycle(forward);
                SettingsUpdate::speed(self.speed)
            }
            OptionRow::Color(snake_id) => {
                let color = self.snake_colors.get(snake_id)?.cycle(forward);
                self.snake_colors[snake_id] = color.clone();
                SettingsUpdate::snake_color(snake_id, color).ok()?
            }
        };
        Some(AppCommand::UpdateSettings(update))
    }

    fn row_line(&self, index: usize, row: OptionRow) -> Line<'static> {
        let mut label_style = Style::default().fg(Color::Gray);
        if index == self.selected {
            label_style = label_style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }

        match row {
            OptionRow::Speed => Line::from(vec![
                Span::styled(" Game Speed        ".to_string(), label_style),
                Span::raw(format!("  ◀ {} ▶", self.speed)),
            ]),
            OptionRow::Color(snake_id) => {
                let name = SNAKE_NAMES.get(snake_id).copied().unwrap_or("?");
                let color = &self.snake_colors[snake_id];
                Line::from(vec![
                    Span::styled(format!(" Snake {:<6} Color ", name), label_style),
                    Span::raw("  ◀ "),
                    Span::styled("■■ ", Style::default().fg(snake_color(color))),
                    Span::raw(format!("{} ▶", color)),
                ])
            }
        }
    }
}

impl View for OptionsPanelState {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + ROWS.len() - 1) % ROWS.len();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % ROWS.len();
                None
            }
            KeyCode::Left | KeyCode::Char('h') => self.change_selected(false),
            KeyCode::Right | KeyCode::Char('l') => self.change_selected(true),
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('o') | KeyCode::Char('q') => {
                Some(AppCommand::CloseOptions)
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, _snapshot: &GameSnapshot) {
        let mut lines = vec![Line::from("")];
        for (index, row) in ROWS.iter().enumerate() {
            lines.push(self.row_line(index, *row));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "↑/↓ select   ←/→ change   Esc close",
            Style::default().fg(Color::DarkGray),
        )));

        let area = centered_rect(frame.area(), 56, lines.len() as u16 + 2);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Left)
                .block(Block::default().borders(Borders::ALL).title(" Game Options ")),
            area,
        );
    }
}
