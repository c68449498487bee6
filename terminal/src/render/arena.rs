use super::traits::GameObjectRenderer;
use super::types::{CharGrid, RenderConfig};
use common::{in_bounds, GameSnapshot, GRID_HEIGHT, GRID_WIDTH};

pub struct ArenaRenderer<R: GameObjectRenderer> {
    renderer: R,
}

impl<R: GameObjectRenderer> ArenaRenderer<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn render(&self, snapshot: &GameSnapshot, config: &RenderConfig) -> CharGrid {
        let width = GRID_WIDTH as usize;
        let height = GRID_HEIGHT as usize;
        let mut grid = CharGrid::new(width, height, config.chars_per_point);

        let empty = self.renderer.render_empty();
        for y in 0..height {
            for x in 0..width {
                grid.set_logical_point(x, y, &empty);
            }
        }

        if in_bounds(&snapshot.food) {
            let pattern = self.renderer.render_food();
            grid.set_logical_point(snapshot.food.x as usize, snapshot.food.y as usize, &pattern);
        }

        for (snake_id, snake) in snapshot.snakes.iter().enumerate() {
            // Tail first so the head wins on any shared cell
            for (i, pos) in snake.body.iter().enumerate().rev() {
                if !in_bounds(pos) {
                    continue;
                }
                let is_head = i == 0;
                let direction = is_head.then_some(snake.direction);
                let pattern = self
                    .renderer
                    .render_snake_segment(direction, is_head, snake_id);
                grid.set_logical_point(pos.x as usize, pos.y as usize, &pattern);
            }
        }

        grid
    }
}
