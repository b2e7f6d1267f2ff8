pub mod collectible;
pub mod color_pool;
pub mod constants;
pub mod game_manager;
pub mod game_state;
pub mod play_area;
pub mod player;

pub use collectible::Collectible;
pub use color_pool::ColorPool;
pub use constants::*;
pub use game_manager::{ConnectionPhase, GameManager, Participant};
pub use game_state::GameState;
pub use play_area::{PlayArea, Position};
pub use player::{collides, rank, step, Direction, Player};
