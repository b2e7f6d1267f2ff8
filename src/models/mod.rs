pub mod requests;
pub mod responses;

pub use requests::{ClientMessage, PlayerUpdate};
pub use responses::{ErrorResponse, JoinOffer, ServerMessage, StatsResponse};
