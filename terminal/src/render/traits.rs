use common::Direction;
use super::types::{CharPattern, CharDimensions};

pub trait GameObjectRenderer {
    fn char_dimensions(&self) -> CharDimensions;

    /// `direction` is only set for heads.
    fn render_snake_segment(
        &self,
        direction: Option<Direction>,
        is_head: bool,
        snake_id: usize,
    ) -> CharPattern;

    fn render_food(&self) -> CharPattern;

    fn render_empty(&self) -> CharPattern;
}
