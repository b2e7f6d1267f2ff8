pub mod movement;
pub mod validation;

pub use movement::plan_move;
pub use validation::{validate_collectible, validate_player};
