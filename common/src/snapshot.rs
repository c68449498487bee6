use serde::{Deserialize, Serialize};

use crate::{Direction, GameOverCause, GameState, Position, SnakeColor, Speed};

/// Read-only view of one snake for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeView {
    pub body: Vec<Position>,
    pub direction: Direction,
    pub color: SnakeColor,
    pub score: u32,
}

/// What a renderer needs after each tick. Never fed back into the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub is_running: bool,
    pub tick: u32,
    pub snakes: Vec<SnakeView>,
    pub food: Position,
    pub speed: Speed,
    pub game_over: Option<GameOverCause>,
}

impl GameSnapshot {
    pub fn scores(&self) -> Vec<u32> {
        self.snakes.iter().map(|snake| snake.score).collect()
    }

    /// Snake with the strictly highest score, `None` on a tie.
    pub fn leader(&self) -> Option<usize> {
        let best = self.snakes.iter().map(|snake| snake.score).max()?;
        let mut leaders = self
            .snakes
            .iter()
            .enumerate()
            .filter(|(_, snake)| snake.score == best);
        let (id, _) = leaders.next()?;
        if leaders.next().is_some() { None } else { Some(id) }
    }
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        let snakes = state
            .snakes
            .iter()
            .zip(state.snake_colors.iter())
            .zip(state.scores.iter())
            .map(|((snake, color), score)| SnakeView {
                body: snake.body.iter().copied().collect(),
                direction: snake.direction,
                color: color.clone(),
                score: *score,
            })
            .collect();

        GameSnapshot {
            is_running: state.is_running,
            tick: state.tick,
            snakes,
            food: state.food,
            speed: state.speed,
            game_over: state.game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(11);
        state.scores = [3, 5];
        let snapshot = GameSnapshot::from(&state);

        assert_eq!(snapshot.snakes.len(), 2);
        assert_eq!(snapshot.scores(), vec![3, 5]);
        assert_eq!(snapshot.food, state.food);
        assert_eq!(snapshot.snakes[0].body, vec![Position::new(5, 5)]);
        assert_eq!(snapshot.snakes[1].color, state.snake_colors[1]);
        assert_eq!(snapshot.leader(), Some(1));
    }

    #[test]
    fn test_leader_tie() {
        let state = GameState::new(11);
        assert_eq!(GameSnapshot::from(&state).leader(), None);
    }
}
