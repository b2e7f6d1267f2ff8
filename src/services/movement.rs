use rand::Rng;

use crate::{
    core::{Collectible, Direction, PlayArea, Player},
    models::PlayerUpdate,
};

/// Work out what a participant reports after one movement intent
///
/// Moves a copy of `player`. If it picks up `coin`, the coin's value is added
/// to the score and a replacement coin is created elsewhere.
///
/// # Returns
///
/// The `player_moved` payload, or None if the player did not move and
/// nothing should be sent
pub fn plan_move<R: Rng>(
    player: &Player,
    coin: Option<&Collectible>,
    direction: Direction,
    speed: i32,
    area: &PlayArea,
    rng: &mut R,
) -> Option<PlayerUpdate> {
    let mut next = player.clone();
    if !next.move_player(direction, speed, area) {
        return None;
    }

    let replacement = match coin {
        Some(coin) if next.collision(coin) => {
            next.score = next.score.saturating_add(coin.value);
            Some(coin.respawn(area, rng))
        }
        _ => None,
    };

    Some(PlayerUpdate {
        player: next,
        coin: replacement,
    })
}
