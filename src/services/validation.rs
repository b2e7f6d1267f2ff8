use crate::{
    core::{Collectible, PlayArea, Player},
    error::SyncError,
};

/// Check a player update against the connection that sent it
///
/// Only identity, color and bounds are checked. Scores and step sizes are
/// taken as sent.
///
/// # Arguments
///
/// * `player` - Player state sent by the participant
/// * `identity` - Identity of the sending connection
/// * `color` - Color allocated to the sending connection
/// * `area` - Play area the position must lie in
pub fn validate_player(
    player: &Player,
    identity: &str,
    color: &str,
    area: &PlayArea,
) -> Result<(), SyncError> {
    if player.id != identity {
        return Err(SyncError::IdentityMismatch {
            expected: identity.to_string(),
            sent: player.id.clone(),
        });
    }

    if player.color != color {
        return Err(SyncError::ColorMismatch {
            expected: color.to_string(),
            sent: player.color.clone(),
        });
    }

    if !area.contains(player.position()) {
        return Err(SyncError::OutOfBounds {
            x: player.x,
            y: player.y,
        });
    }

    Ok(())
}

/// Check a coin sent by a participant
pub fn validate_collectible(coin: &Collectible, area: &PlayArea) -> Result<(), SyncError> {
    if coin.value == 0 {
        return Err(SyncError::InvalidCollectible(
            "value must be positive".to_string(),
        ));
    }

    if !area.contains(coin.position()) {
        return Err(SyncError::InvalidCollectible(format!(
            "position ({}, {}) is outside the play area",
            coin.x, coin.y
        )));
    }

    Ok(())
}
