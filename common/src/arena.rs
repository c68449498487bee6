use crate::util::RandomGenerator;
use crate::{FOOD_SAMPLE_ATTEMPTS, GRID_HEIGHT, GRID_WIDTH, Position, Snake};

pub fn in_bounds(pos: &Position) -> bool {
    pos.x >= 0 && pos.x < GRID_WIDTH && pos.y >= 0 && pos.y < GRID_HEIGHT
}

pub fn is_occupied(pos: &Position, snakes: &[Snake]) -> bool {
    snakes.iter().any(|snake| snake.contains_point(pos))
}

/// Every unoccupied cell in row-major order.
pub fn free_cells(snakes: &[Snake]) -> Vec<Position> {
    (0..GRID_HEIGHT)
        .flat_map(|y| (0..GRID_WIDTH).map(move |x| Position { x, y }))
        .filter(|pos| !is_occupied(pos, snakes))
        .collect()
}

/// Picks a uniformly random cell not covered by any snake.
///
/// Rejection sampling is tried a bounded number of times; after that the free cells are
/// enumerated and one is drawn from them. Returns `None` only when the board is full.
pub fn place_food<R: RandomGenerator + ?Sized>(snakes: &[Snake], rng: &mut R) -> Option<Position> {
    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let position = Position {
            x: rng.next_below(GRID_WIDTH as u32) as i16,
            y: rng.next_below(GRID_HEIGHT as u32) as i16,
        };

        if !is_occupied(&position, snakes) {
            return Some(position);
        }
    }

    let free = free_cells(snakes);
    if free.is_empty() {
        return None;
    }

    log::debug!("Food sampling exhausted, drawing from {} free cells", free.len());
    let index = rng.next_below(free.len() as u32) as usize;
    free.get(index).copied()
}
