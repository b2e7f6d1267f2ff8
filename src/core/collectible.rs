use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{PlayArea, Position, COIN_VALUE, MAX_COIN_ID, RESPAWN_ATTEMPTS};

/// The single coin on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectible {
    pub x: i32,
    pub y: i32,
    /// Score awarded on pickup
    pub value: u32,
    /// Random tag, collisions are unlikely but possible
    pub id: u32,
}

impl Collectible {
    /// Create a coin at a random spot inside the play area
    pub fn spawn<R: Rng>(area: &PlayArea, rng: &mut R) -> Self {
        let position = area.random_position(rng);
        Self {
            x: position.x,
            y: position.y,
            value: COIN_VALUE,
            id: rng.gen_range(0..MAX_COIN_ID),
        }
    }

    /// Create the coin that replaces `self` after a pickup
    ///
    /// The replacement avoids the spot of the coin it replaces. An area of
    /// a single cell has nowhere else to go, so after `RESPAWN_ATTEMPTS`
    /// misses the last random spot is kept.
    pub fn respawn<R: Rng>(&self, area: &PlayArea, rng: &mut R) -> Self {
        let mut next = Self::spawn(area, rng);
        for _ in 1..RESPAWN_ATTEMPTS {
            if next.position() != self.position() {
                break;
            }
            next = Self::spawn(area, rng);
        }
        next
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}
