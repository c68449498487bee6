use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::util::PseudoRandom;
use crate::{
    Direction, GRID_HEIGHT, GRID_WIDTH, GameOverCause, Position, SNAKE_COUNT, SPAWN_POSITIONS,
    SettingsUpdate, Snake, SnakeColor, Speed, calculate_ai_move, default_snake_colors,
    find_overlap, in_bounds, overlap_cause, place_food,
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum GameCommand {
    Start,
    Tick,
    UpdateSettings { update: SettingsUpdate },
    PlaceFood { position: Position },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    SnakeTurned { snake_id: u32, direction: Direction },
    SnakeMoved { snake_id: u32, head: Position },
    FoodEaten { snake_id: u32, position: Position },
    FoodSpawned { position: Position },
    FoodPlaced { position: Position },
    SettingsChanged { speed: Speed, snake_colors: [SnakeColor; SNAKE_COUNT] },
    GameOver { cause: GameOverCause },
}

/// The whole duel. Simulation fields are reset by `Start`; speed and colours survive it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameState {
    pub is_running: bool,
    pub tick: u32,
    pub snakes: [Snake; SNAKE_COUNT],
    pub food: Position,
    pub scores: [u32; SNAKE_COUNT],
    pub speed: Speed,
    pub snake_colors: [SnakeColor; SNAKE_COUNT],
    pub game_over: Option<GameOverCause>,
    pub rng: PseudoRandom,
}

fn initial_snakes() -> [Snake; SNAKE_COUNT] {
    [
        Snake::new(SPAWN_POSITIONS[0].into(), Direction::Right),
        Snake::new(SPAWN_POSITIONS[1].into(), Direction::Left),
    ]
}

impl GameState {
    /// A fresh session: snakes in opposite corners, not running.
    pub fn new(rng_seed: u64) -> Self {
        Self::new_with_settings(rng_seed, Speed::default(), default_snake_colors())
    }

    pub fn new_with_settings(
        rng_seed: u64,
        speed: Speed,
        snake_colors: [SnakeColor; SNAKE_COUNT],
    ) -> Self {
        let mut rng = PseudoRandom::new(rng_seed);
        let snakes = initial_snakes();
        // Two single-cell snakes always leave room
        let food = place_food(&snakes, &mut rng)
            .unwrap_or(Position::new(GRID_WIDTH / 2, GRID_HEIGHT / 2));

        GameState {
            is_running: false,
            tick: 0,
            snakes,
            food,
            scores: [0; SNAKE_COUNT],
            speed,
            snake_colors,
            game_over: None,
            rng,
        }
    }

    pub fn current_tick(&self) -> u32 {
        self.tick
    }

    pub fn get_snake(&self, snake_id: usize) -> Result<&Snake> {
        self.snakes
            .get(snake_id)
            .with_context(|| format!("Snake {} not found", snake_id))
    }

    pub fn iter_snakes(&self) -> impl Iterator<Item = (u32, &Snake)> {
        self.snakes
            .iter()
            .enumerate()
            .map(|(id, snake)| (id as u32, snake))
    }

    /// Pure transition: returns the next state and what happened, leaving `self` untouched.
    pub fn apply_command(&self, command: &GameCommand) -> Result<(GameState, Vec<GameEvent>)> {
        let mut next = self.clone();
        let events = next.exec_command(command)?;
        Ok((next, events))
    }

    pub fn exec_command(&mut self, command: &GameCommand) -> Result<Vec<GameEvent>> {
        match command {
            GameCommand::Start => Ok(self.start()),

            GameCommand::Tick => {
                // A stopped game is frozen until the next start
                if !self.is_running {
                    return Ok(Vec::new());
                }
                self.tick_forward()
            }

            GameCommand::UpdateSettings { update } => Ok(self.update_settings(update)),

            GameCommand::PlaceFood { position } => {
                if !in_bounds(position) {
                    bail!(
                        "Food position ({}, {}) is outside the {}x{} arena",
                        position.x,
                        position.y,
                        GRID_WIDTH,
                        GRID_HEIGHT
                    );
                }
                if !self.is_running {
                    warn!("Ignoring food placement at {:?}: game is not running", position);
                    return Ok(Vec::new());
                }

                // Not re-validated against the bodies; a tail may be about to leave the cell
                self.food = *position;
                Ok(vec![GameEvent::FoodPlaced { position: *position }])
            }
        }
    }

    fn start(&mut self) -> Vec<GameEvent> {
        let snakes = initial_snakes();
        let food = place_food(&snakes, &mut self.rng)
            .unwrap_or(Position::new(GRID_WIDTH / 2, GRID_HEIGHT / 2));

        self.snakes = snakes;
        self.food = food;
        self.scores = [0; SNAKE_COUNT];
        self.tick = 0;
        self.game_over = None;
        self.is_running = true;

        info!("Game started, food at {:?}", food);
        vec![GameEvent::Started, GameEvent::FoodSpawned { position: food }]
    }

    fn update_settings(&mut self, update: &SettingsUpdate) -> Vec<GameEvent> {
        let mut changed = false;

        if let Some(speed) = update.speed {
            changed |= self.speed != speed;
            self.speed = speed;
        }
        for (slot, color) in self.snake_colors.iter_mut().zip(update.snake_colors.iter()) {
            if let Some(color) = color {
                changed |= *slot != *color;
                *slot = color.clone();
            }
        }

        if !changed {
            return Vec::new();
        }

        debug!("Settings changed: speed={}, colors={:?}", self.speed, self.snake_colors);
        vec![GameEvent::SettingsChanged {
            speed: self.speed,
            snake_colors: self.snake_colors.clone(),
        }]
    }

    fn finish(&mut self, cause: GameOverCause) {
        self.is_running = false;
        // The first cause detected in a tick is the one reported
        if self.game_over.is_none() {
            self.game_over = Some(cause);
        }
    }

    /// One simulation step. All decisions read the pre-tick board.
    fn tick_forward(&mut self) -> Result<Vec<GameEvent>> {
        let mut out = Vec::new();

        let mut directions = [Direction::Up; SNAKE_COUNT];
        for (snake_id, direction) in directions.iter_mut().enumerate() {
            *direction = calculate_ai_move(self, snake_id)
                .with_context(|| format!("No move available for snake {}", snake_id))?;
        }

        let food = self.food;
        let mut next_snakes = self.snakes.clone();
        let mut food_eaten = false;

        for (snake_id, direction) in directions.into_iter().enumerate() {
            let snake = self.get_snake(snake_id)?;
            if snake.direction != direction {
                out.push(GameEvent::SnakeTurned { snake_id: snake_id as u32, direction });
            }

            let head = snake.next_head(direction)?;
            if !in_bounds(&head) {
                info!("Snake {} hit the wall at {:?}", snake_id, head);
                next_snakes[snake_id].direction = direction;
                self.finish(GameOverCause::Wall { snake_id: snake_id as u32 });
                continue;
            }

            let ate_food = head == food;
            next_snakes[snake_id] = snake.advanced(direction, ate_food)?;
            out.push(GameEvent::SnakeMoved { snake_id: snake_id as u32, head });

            if ate_food {
                self.scores[snake_id] += 1;
                food_eaten = true;
                out.push(GameEvent::FoodEaten { snake_id: snake_id as u32, position: food });
            }
        }

        self.snakes = next_snakes;

        if let Some(position) = find_overlap(&self.snakes) {
            let cause = overlap_cause(&self.snakes, position);
            info!("Collision at {:?}: {:?}", position, cause);
            self.finish(cause);
        }

        if food_eaten {
            match place_food(&self.snakes, &mut self.rng) {
                Some(position) => {
                    self.food = position;
                    out.push(GameEvent::FoodSpawned { position });
                }
                None => {
                    info!("No free cell left for food");
                    self.finish(GameOverCause::BoardFull);
                }
            }
        }

        self.tick += 1;

        if !self.is_running {
            if let Some(cause) = self.game_over {
                info!("Game over after {} ticks, scores {:?}", self.tick, self.scores);
                out.push(GameEvent::GameOver { cause });
            }
        }

        debug!("Tick {}: directions {:?}, food {:?}", self.tick, directions, self.food);
        Ok(out)
    }
}
