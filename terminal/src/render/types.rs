#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    pub chars_per_point: CharDimensions,
}

impl Default for RenderConfig {
    fn default() -> Self {
        // Terminal cells are roughly twice as tall as wide
        Self {
            chars_per_point: CharDimensions::new(2, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharDimensions {
    pub horizontal: usize,
    pub vertical: usize,
}

impl CharDimensions {
    pub fn new(horizontal: usize, vertical: usize) -> Self {
        Self { horizontal, vertical }
    }
}

/// What a character depicts, so the view can colour it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Background,
    Food,
    Snake(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub ch: char,
    pub tint: Tint,
}

pub struct CharGrid {
    grid: Vec<Vec<GridCell>>,
    logical_width: usize,
    logical_height: usize,
    char_dims: CharDimensions,
}

impl CharGrid {
    pub fn new(logical_width: usize, logical_height: usize, char_dims: CharDimensions) -> Self {
        let physical_width = logical_width * char_dims.horizontal;
        let physical_height = logical_height * char_dims.vertical;
        let blank = GridCell {
            ch: ' ',
            tint: Tint::Background,
        };
        Self {
            grid: vec![vec![blank; physical_width]; physical_height],
            logical_width,
            logical_height,
            char_dims,
        }
    }

    pub fn set_logical_point(&mut self, x: usize, y: usize, pattern: &CharPattern) {
        let start_x = x * self.char_dims.horizontal;
        let start_y = y * self.char_dims.vertical;

        for (dy, row) in pattern.chars.iter().enumerate() {
            for (dx, &ch) in row.iter().enumerate() {
                if let Some(cell) = self
                    .grid
                    .get_mut(start_y + dy)
                    .and_then(|grid_row| grid_row.get_mut(start_x + dx))
                {
                    *cell = GridCell {
                        ch,
                        tint: pattern.tint,
                    };
                }
            }
        }
    }

    pub fn rows(&self) -> &[Vec<GridCell>] {
        &self.grid
    }

    pub fn into_lines(self) -> Vec<Vec<char>> {
        self.grid
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.ch).collect())
            .collect()
    }

    pub fn physical_width(&self) -> usize {
        self.logical_width * self.char_dims.horizontal
    }

    pub fn physical_height(&self) -> usize {
        self.logical_height * self.char_dims.vertical
    }
}

#[derive(Clone, Debug)]
pub struct CharPattern {
    pub chars: Vec<Vec<char>>,
    pub tint: Tint,
}

impl CharPattern {
    pub fn new(chars: Vec<Vec<char>>, tint: Tint) -> Self {
        Self { chars, tint }
    }

    pub fn single(ch: char, dims: CharDimensions, tint: Tint) -> Self {
        let chars = vec![vec![ch; dims.horizontal]; dims.vertical];
        Self { chars, tint }
    }

    pub fn empty(dims: CharDimensions) -> Self {
        Self::single(' ', dims, Tint::Background)
    }
}
