use crate::{Direction, GameState, Position, Snake, in_bounds, next_position};

/// Greedy AI that steers toward the food while avoiding walls and bodies.
///
/// Both snakes decide from the same pre-tick board, so neither sees the other's move for
/// this tick. Returns `None` for an unknown snake id or an empty body.
pub fn calculate_ai_move(game_state: &GameState, snake_id: usize) -> Option<Direction> {
    let snake = game_state.snakes.get(snake_id)?;
    let other = game_state.snakes.get(other_snake_id(snake_id))?;
    choose_direction(snake, other, &game_state.food)
}

/// Id of the opponent in a duel.
pub fn other_snake_id(snake_id: usize) -> usize {
    if snake_id == 0 { 1 } else { 0 }
}

/// Directions that keep the head in the arena and off both bodies, excluding the reversal.
/// Order follows [`Direction::ALL`].
pub fn safe_directions(snake: &Snake, other: &Snake) -> Vec<Direction> {
    let Ok(head) = snake.head() else {
        return Vec::new();
    };

    Direction::ALL
        .into_iter()
        .filter(|direction| !snake.direction.is_opposite(direction))
        .filter(|direction| is_safe(&next_position(head, *direction), snake, other))
        .collect()
}

pub fn choose_direction(snake: &Snake, other: &Snake, food: &Position) -> Option<Direction> {
    let head = snake.head().ok()?;

    let mut best: Option<(Direction, i32)> = None;
    for direction in safe_directions(snake, other) {
        let new_pos = next_position(head, direction);
        let score = -(new_pos.manhattan_distance(food) as i32);

        // Strictly greater, so ties keep the earlier direction
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((direction, score));
        }
    }

    // Boxed in: keep going and accept the crash
    Some(best.map_or(snake.direction, |(direction, _)| direction))
}

fn is_safe(pos: &Position, snake: &Snake, other: &Snake) -> bool {
    in_bounds(pos) && !snake.contains_point(pos) && !other.contains_point(pos)
}
