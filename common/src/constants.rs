/// Arena width in cells
pub const GRID_WIDTH: i16 = 40;

/// Arena height in cells
pub const GRID_HEIGHT: i16 = 30;

/// Number of snakes in a duel
pub const SNAKE_COUNT: usize = 2;

/// Default tick interval in milliseconds for game loops
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Random samples tried before food placement falls back to scanning free cells
pub const FOOD_SAMPLE_ATTEMPTS: u32 = 64;

/// Maximum number of ticks the engine will catch up on after a stalled frame
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// Number of events kept in the engine's rolling event log
pub const EVENT_LOG_CAPACITY: usize = 256;

/// Spawn cells for both snakes, in opposite corners
pub const SPAWN_POSITIONS: [(i16, i16); SNAKE_COUNT] = [(5, 5), (GRID_WIDTH - 6, GRID_HEIGHT - 6)];

/// Display names, indexed by snake id
pub const SNAKE_NAMES: [&str; SNAKE_COUNT] = ["Alpha", "Beta"];
