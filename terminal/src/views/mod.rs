pub mod board;
pub mod options;

pub use board::BoardViewState;
pub use options::OptionsPanelState;

use crate::app::AppCommand;
use common::{GameSnapshot, SnakeColor};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Frame;

pub trait View {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand>;

    fn handle_mouse(&mut self, _mouse: MouseEvent) -> Option<AppCommand> {
        None
    }

    fn render(&self, frame: &mut Frame, snapshot: &GameSnapshot);
}

pub fn snake_color(color: &SnakeColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// A `width` x `height` rect centred in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
