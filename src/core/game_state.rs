use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Collectible, Player};

/// Authoritative board shared by every participant
///
/// This is also the broadcast payload: `{"players": {id: player}, "coin": coin}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Map of connection identity to Player
    pub players: HashMap<String, Player>,
    /// Current coin, None until the first participant has joined
    pub coin: Option<Collectible>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `identity`
    pub fn upsert_player(&mut self, identity: &str, player: Player) {
        self.players.insert(identity.to_string(), player);
    }

    /// Replace the coin unconditionally
    pub fn set_collectible(&mut self, coin: Collectible) {
        self.coin = Some(coin);
    }

    /// Remove the entry for `identity`, a no-op if it is absent
    pub fn remove_player(&mut self, identity: &str) -> Option<Player> {
        self.players.remove(identity)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Copy of the current board
    pub fn snapshot(&self) -> GameState {
        self.clone()
    }

    /// Every player's score, in no particular order
    pub fn scores(&self) -> Vec<u32> {
        self.players.values().map(|p| p.score).collect()
    }
}
