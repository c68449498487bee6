use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Position { x, y }
    }

    pub fn manhattan_distance(&self, other: &Position) -> u16 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u16
    }
}

impl From<(i16, i16)> for Position {
    fn from((x, y): (i16, i16)) -> Self {
        Position { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order used wherever directions are compared; AI ties resolve to the earliest.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    /// Cell offset (dx, dy); y grows downwards.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// The cell one step away from `pos`. No wraparound: the result may lie outside the arena.
pub fn next_position(pos: &Position, direction: Direction) -> Position {
    let (dx, dy) = direction.delta();
    Position {
        x: pos.x + dx,
        y: pos.y + dy,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    /// Head first, tail last.
    pub body: VecDeque<Position>,
    pub direction: Direction,
}

impl Snake {
    pub fn new(head: Position, direction: Direction) -> Self {
        Snake {
            body: VecDeque::from([head]),
            direction,
        }
    }

    pub fn head(&self) -> Result<&Position> {
        self.body.front().context("Snake body is empty")
    }

    pub fn tail(&self) -> Result<&Position> {
        self.body.back().context("Snake body is empty")
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn contains_point(&self, point: &Position) -> bool {
        self.body.iter().any(|segment| segment == point)
    }

    /// Where the head would land when moving in `direction`.
    pub fn next_head(&self, direction: Direction) -> Result<Position> {
        Ok(next_position(self.head()?, direction))
    }

    /// Returns the snake after one step in `direction`. Eating keeps the tail, so the
    /// body grows by one; otherwise the tail is dropped and the length is unchanged.
    /// Bounds and occupancy are the caller's concern.
    pub fn advanced(&self, direction: Direction, ate_food: bool) -> Result<Snake> {
        let new_head = self.next_head(direction)?;
        let mut body = self.body.clone();
        body.push_front(new_head);
        if !ate_food {
            body.pop_back();
        }

        Ok(Snake { body, direction })
    }
}
