use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::{Position, SNAKE_NAMES, Snake};

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// The snake tried to leave the arena.
    Wall { snake_id: u32 },
    /// Two body segments share a cell.
    Collision { position: Position },
    /// Both heads entered the same cell on the same tick.
    HeadOn { position: Position },
    /// No free cell was left for new food.
    BoardFull,
}

impl fmt::Display for GameOverCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverCause::Wall { snake_id } => {
                let name = SNAKE_NAMES.get(*snake_id as usize).unwrap_or(&"A snake");
                write!(f, "{} hit the wall", name)
            }
            GameOverCause::Collision { position } => {
                write!(f, "Collision at ({}, {})", position.x, position.y)
            }
            GameOverCause::HeadOn { position } => {
                write!(f, "Head-on crash at ({}, {})", position.x, position.y)
            }
            GameOverCause::BoardFull => write!(f, "The board is full"),
        }
    }
}

/// First cell covered by two distinct segments, across all snakes including a snake's own body.
pub fn find_overlap(snakes: &[Snake]) -> Option<Position> {
    let mut seen = HashSet::new();
    snakes
        .iter()
        .flat_map(|snake| snake.body.iter())
        .find(|segment| !seen.insert(**segment))
        .copied()
}

/// Classifies an overlap: a shared cell holding both heads is a head-on crash.
pub fn overlap_cause(snakes: &[Snake], position: Position) -> GameOverCause {
    let heads_on_cell = snakes
        .iter()
        .filter(|snake| snake.head().is_ok_and(|head| *head == position))
        .count();

    if heads_on_cell > 1 {
        GameOverCause::HeadOn { position }
    } else {
        GameOverCause::Collision { position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;

    fn snake_from(cells: &[(i16, i16)]) -> Snake {
        Snake {
            body: cells.iter().copied().map(Position::from).collect(),
            direction: Direction::Right,
        }
    }

    #[test]
    fn test_disjoint_snakes_do_not_overlap() {
        let snakes = [snake_from(&[(1, 1), (0, 1)]), snake_from(&[(5, 5), (6, 5)])];
        assert_eq!(find_overlap(&snakes), None);
    }

    #[test]
    fn test_head_into_other_body() {
        let snakes = [snake_from(&[(5, 5), (4, 5)]), snake_from(&[(6, 5), (5, 5), (5, 6)])];
        let position = find_overlap(&snakes).unwrap();
        assert_eq!(position, Position::new(5, 5));
        assert_eq!(
            overlap_cause(&snakes, position),
            GameOverCause::Collision { position }
        );
    }

    #[test]
    fn test_self_overlap() {
        let snakes = [snake_from(&[(2, 2), (3, 2), (3, 3), (2, 3), (2, 2)]), snake_from(&[(9, 9)])];
        assert_eq!(find_overlap(&snakes), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_cause_display() {
        assert_eq!(GameOverCause::Wall { snake_id: 1 }.to_string(), "Beta hit the wall");
        assert_eq!(
            GameOverCause::HeadOn { position: Position::new(3, 4) }.to_string(),
            "Head-on crash at (3, 4)"
        );
    }

    #[test]
    fn test_head_on_is_distinguished() {
        let snakes = [snake_from(&[(7, 7), (6, 7)]), snake_from(&[(7, 7), (8, 7)])];
        let position = find_overlap(&snakes).unwrap();
        assert_eq!(
            overlap_cause(&snakes, position),
            GameOverCause::HeadOn { position: Position::new(7, 7) }
        );
    }
}
