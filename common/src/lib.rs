mod ai;
mod arena;
mod collision;
mod constants;
mod game_engine;
mod game_state;
mod settings;
mod snake;
mod snapshot;

pub mod util;

pub use ai::*;
pub use arena::*;
pub use collision::*;
pub use constants::*;
pub use game_engine::*;
pub use game_state::*;
pub use settings::*;
pub use snake::*;
pub use snapshot::*;
pub use util::{PseudoRandom, RandomGenerator};
