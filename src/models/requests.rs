use serde::{Deserialize, Serialize};

use crate::{
    core::{Collectible, Player},
    error::SyncError,
};

/// Messages a participant sends to the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Join acknowledgement carrying the freshly built player
    Join(PlayerUpdate),
    /// Locally computed player state after a move
    PlayerMoved(PlayerUpdate),
}

/// A player's new state plus an optional replacement coin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    pub player: Player,
    /// Present when this update created a coin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin: Option<Collectible>,
}

impl ClientMessage {
    /// Decode a text frame
    ///
    /// # Errors
    ///
    /// Returns `SyncError::MalformedMessage` for anything that is not a
    /// well-formed `join` or `player_moved` message
    pub fn parse(text: &str) -> Result<Self, SyncError> {
        serde_json::from_str(text).map_err(|e| SyncError::MalformedMessage(e.to_string()))
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
