use serde::{Deserialize, Serialize};

use crate::{
    core::{Collectible, GameState},
    error::SyncError,
};

/// Messages the relay sends to participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Join handshake, sent only to the connecting participant
    NewPlayer(JoinOffer),
    /// Full board, sent to everyone after every change
    CurrentState(GameState),
    /// A rejected request, sent only to the participant that made it
    Error(ErrorResponse),
}

/// Identity and color handed to a connecting participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinOffer {
    /// Players on the board when the connection arrived
    pub player_count: usize,
    /// Connection identity the participant must use as its player id
    pub id: String,
    pub color: String,
    /// Initial coin, only offered when the board was empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin: Option<Collectible>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ServerMessage {
    pub fn error(err: &SyncError) -> Self {
        ServerMessage::Error(ErrorResponse {
            detail: err.to_string(),
        })
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Relay statistics for the stats endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Players present on the board
    pub players: usize,
    /// Open connections, joined or not
    pub participants: usize,
    pub available_colors: usize,
    pub has_coin: bool,
}
