use std::collections::HashMap;
use time::OffsetDateTime;
use tokio::sync::broadcast;

use super::{Collectible, ColorPool, GameState, PlayArea, BROADCAST_CAPACITY, DEFAULT_PALETTE};
use crate::{
    error::SyncError,
    models::{ClientMessage, JoinOffer, PlayerUpdate, ServerMessage, StatsResponse},
    services::{validate_collectible, validate_player},
};

/// Where a connection is in the join handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    /// Identity and color handed out, waiting for the join acknowledgement
    Connecting,
    /// Player is on the board and may move
    Active,
}

/// An open connection and the color it holds
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: String,
    pub color: String,
    pub phase: ConnectionPhase,
    pub connected_at: OffsetDateTime,
}

/// Owner of the shared board, the color pool and the participant table
///
/// Every method that changes the board broadcasts the resulting snapshot
/// before returning, so callers holding the manager behind a single lock
/// see snapshots in the same order as the changes that produced them.
#[derive(Debug)]
pub struct GameManager {
    state: GameState,
    colors: ColorPool,
    participants: HashMap<String, Participant>,
    area: PlayArea,
    /// Broadcast channel for serialized snapshots
    broadcast_tx: broadcast::Sender<String>,
}

impl GameManager {
    /// Create a manager with the default palette
    pub fn new() -> Self {
        Self::with_palette(DEFAULT_PALETTE)
    }

    /// Create a manager handing out colors from `palette`
    ///
    /// The last color of the palette is handed out first.
    pub fn with_palette<I, S>(palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CAPACITY);

        Self {
            state: GameState::new(),
            colors: ColorPool::new(palette),
            participants: HashMap::new(),
            area: PlayArea::default(),
            broadcast_tx,
        }
    }

    /// Receive every snapshot broadcast from now on
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.broadcast_tx.subscribe()
    }

    /// Register a new connection
    ///
    /// Allocates a color and, if the board has no players yet, an initial
    /// coin. The board itself is left alone until the participant
    /// acknowledges the offer.
    ///
    /// # Errors
    ///
    /// `ColorPoolExhausted` if every color is taken; nothing is registered
    /// in that case
    pub fn connect(&mut self, identity: &str) -> Result<JoinOffer, SyncError> {
        if self.participants.contains_key(identity) {
            return Err(SyncError::AlreadyJoined);
        }

        let player_count = self.state.player_count();
        let color = match self.colors.pop() {
            Some(color) => color,
            None => {
                tracing::warn!("Color pool exhausted, rejecting connection {}", identity);
                return Err(SyncError::ColorPoolExhausted);
            }
        };

        let coin = (player_count == 0)
            .then(|| Collectible::spawn(&self.area, &mut rand::thread_rng()));

        self.participants.insert(
            identity.to_string(),
            Participant {
                id: identity.to_string(),
                color: color.clone(),
                phase: ConnectionPhase::Connecting,
                connected_at: OffsetDateTime::now_utc(),
            },
        );

        tracing::info!(
            "Connection {} offered color {} ({} players on board)",
            identity,
            color,
            player_count
        );

        Ok(JoinOffer {
            player_count,
            id: identity.to_string(),
            color,
            coin,
        })
    }

    /// Apply a decoded message from `identity`
    pub fn handle_message(
        &mut self,
        identity: &str,
        message: ClientMessage,
    ) -> Result<(), SyncError> {
        match message {
            ClientMessage::Join(update) => self.acknowledge_join(identity, update),
            ClientMessage::PlayerMoved(update) => self.apply_move(identity, update),
        }
    }

    /// Put a participant's player on the board after it acknowledged its offer
    ///
    /// A coin in the acknowledgement replaces the current one. Without one,
    /// a coin is spawned only if the board has none yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is unknown, already joined, or
    /// sent a player that fails validation
    pub fn acknowledge_join(
        &mut self,
        identity: &str,
        update: PlayerUpdate,
    ) -> Result<(), SyncError> {
        let participant = self
            .participants
            .get(identity)
            .ok_or_else(|| SyncError::UnknownParticipant(identity.to_string()))?;

        if participant.phase == ConnectionPhase::Active {
            return Err(SyncError::AlreadyJoined);
        }

        validate_player(&update.player, identity, &participant.color, &self.area)?;
        if let Some(coin) = &update.coin {
            validate_collectible(coin, &self.area)?;
        }

        self.state.upsert_player(identity, update.player);
        match update.coin {
            Some(coin) => self.state.set_collectible(coin),
            None if self.state.coin.is_none() => self
                .state
                .set_collectible(Collectible::spawn(&self.area, &mut rand::thread_rng())),
            None => {}
        }

        if let Some(participant) = self.participants.get_mut(identity) {
            participant.phase = ConnectionPhase::Active;
        }

        tracing::info!(
            "Player {} joined ({} on board)",
            identity,
            self.state.player_count()
        );

        self.broadcast_state();
        Ok(())
    }

    /// Store a participant's new player state and, if sent, its replacement coin
    ///
    /// # Errors
    ///
    /// Returns an error if the participant has not joined or sent a player
    /// that fails validation
    pub fn apply_move(&mut self, identity: &str, update: PlayerUpdate) -> Result<(), SyncError> {
        let participant = self
            .participants
            .get(identity)
            .ok_or_else(|| SyncError::UnknownParticipant(identity.to_string()))?;

        if participant.phase != ConnectionPhase::Active {
            return Err(SyncError::NotJoined);
        }

        validate_player(&update.player, identity, &participant.color, &self.area)?;
        if let Some(coin) = &update.coin {
            validate_collectible(coin, &self.area)?;
        }

        tracing::debug!(
            "Player {} moved to ({}, {}) score={}",
            identity,
            update.player.x,
            update.player.y,
            update.player.score
        );

        self.state.upsert_player(identity, update.player);
        if let Some(coin) = update.coin {
            self.state.set_collectible(coin);
        }

        self.broadcast_state();
        Ok(())
    }

    /// Forget a closed connection and give its color back
    ///
    /// Connections that never finished joining only return their color;
    /// the board is untouched and nothing is broadcast.
    ///
    /// # Returns
    ///
    /// False if the identity was not registered
    pub fn disconnect(&mut self, identity: &str) -> bool {
        let Some(participant) = self.participants.remove(identity) else {
            return false;
        };

        let session = OffsetDateTime::now_utc() - participant.connected_at;
        tracing::info!(
            "Connection {} closed after {}s, returning color {}",
            identity,
            session.whole_seconds(),
            participant.color
        );

        self.colors.release(participant.color);

        if self.state.remove_player(identity).is_some() {
            self.broadcast_state();
        }

        true
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn play_area(&self) -> &PlayArea {
        &self.area
    }

    pub fn colors(&self) -> &ColorPool {
        &self.colors
    }

    pub fn participant(&self, identity: &str) -> Option<&Participant> {
        self.participants.get(identity)
    }

    /// Open connections holding a color, joined or not
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn get_stats(&self) -> StatsResponse {
        StatsResponse {
            players: self.state.player_count(),
            participants: self.participants.len(),
            available_colors: self.colors.len(),
            has_coin: self.state.coin.is_some(),
        }
    }

    /// Send the full board to every subscriber
    fn broadcast_state(&self) {
        match ServerMessage::CurrentState(self.state.snapshot()).encode() {
            Ok(text) => {
                tracing::debug!(
                    "Broadcasting state: {} players to {} receivers",
                    self.state.player_count(),
                    self.broadcast_tx.receiver_count()
                );
                // No receivers is fine
                let _ = self.broadcast_tx.send(text);
            }
            Err(e) => tracing::error!("Failed to encode snapshot: {}", e),
        }
    }
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}
