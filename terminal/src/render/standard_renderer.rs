use common::Direction;
use super::traits::GameObjectRenderer;
use super::types::{CharDimensions, CharPattern, Tint};

pub struct StandardRenderer {
    char_dims: CharDimensions,
}

impl StandardRenderer {
    pub fn new(char_dims: CharDimensions) -> Self {
        Self { char_dims }
    }

    fn head_char(direction: Option<Direction>) -> char {
        match direction {
            Some(Direction::Up) => '▲',
            Some(Direction::Down) => '▼',
            Some(Direction::Left) => '◀',
            Some(Direction::Right) => '▶',
            None => '█',
        }
    }

    fn body_char(snake_id: usize) -> char {
        // Shade differs per snake so they stay apart without colour
        match snake_id % 2 {
            0 => '▓',
            _ => '▒',
        }
    }
}

impl GameObjectRenderer for StandardRenderer {
    fn char_dimensions(&self) -> CharDimensions {
        self.char_dims
    }

    fn render_snake_segment(
        &self,
        direction: Option<Direction>,
        is_head: bool,
        snake_id: usize,
    ) -> CharPattern {
        let tint = Tint::Snake(snake_id);
        if !is_head {
            return CharPattern::single(Self::body_char(snake_id), self.char_dims, tint);
        }

        // Head: solid block with the heading marker in the first column
        let mut chars = vec![vec!['█'; self.char_dims.horizontal]; self.char_dims.vertical];
        if let Some(first) = chars.first_mut().and_then(|row| row.first_mut()) {
            *first = Self::head_char(direction);
        }
        CharPattern::new(chars, tint)
    }

    fn render_food(&self) -> CharPattern {
        if self.char_dims.horizontal <= 2 && self.char_dims.vertical == 1 {
            return CharPattern::single('●', self.char_dims, Tint::Food);
        }

        // Larger cells get a checkerboard so the food does not read as a wall
        let mut chars = vec![vec![' '; self.char_dims.horizontal]; self.char_dims.vertical];
        for (y, row) in chars.iter_mut().enumerate() {
            for (x, ch) in row.iter_mut().enumerate() {
                if (x + y) % 2 == 0 {
                    *ch = '●';
                }
            }
        }
        CharPattern::new(chars, Tint::Food)
    }

    fn render_empty(&self) -> CharPattern {
        let mut pattern = CharPattern::empty(self.char_dims);
        if let Some(first) = pattern.chars.first_mut().and_then(|row| row.first_mut()) {
            *first = '·';
        }
        pattern
    }
}
