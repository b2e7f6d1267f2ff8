use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::{
    broadcast::error::RecvError,
    mpsc::{self, error::TrySendError},
};
use uuid::Uuid;

use crate::{
    core::DIRECT_REPLY_CAPACITY,
    error::SyncError,
    models::{ClientMessage, ServerMessage},
    state::AppState,
};

/// WebSocket endpoint for the synchronization protocol
///
/// # Flow
///
/// 1. Assign the connection an identity and a color
/// 2. Send the `new_player` offer (with a coin if the board is empty)
/// 3. Forward every broadcast snapshot to the participant
/// 4. Apply `join` and `player_moved` messages, replying with `error` on rejection
/// 5. Release the identity and its color when the socket closes
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one participant's connection until it closes
async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4().to_string();
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before registering so no snapshot after the offer is missed
    let (offer, mut broadcast_rx) = {
        let mut manager = state.game_manager.write().await;
        let broadcast_rx = manager.subscribe();
        (manager.connect(&connection_id), broadcast_rx)
    };

    let offer = match offer {
        Ok(offer) => offer,
        Err(e) => {
            tracing::warn!("Connection {} rejected: {}", connection_id, e);
            send_message(&mut sender, &ServerMessage::error(&e)).await;
            let _ = sender.send(Message::Close(None)).await;
            return;
        }
    };

    tracing::info!("WebSocket accepted: connection={}", connection_id);

    if !send_message(&mut sender, &ServerMessage::NewPlayer(offer)).await {
        state.game_manager.write().await.disconnect(&connection_id);
        return;
    }

    // Replies meant for this participant only
    let (direct_tx, mut direct_rx) = mpsc::channel::<ServerMessage>(DIRECT_REPLY_CAPACITY);

    let connection_id_clone = connection_id.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                received = broadcast_rx.recv() => match received {
                    Ok(snapshot) => {
                        if sender.send(Message::Text(snapshot)).await.is_err() {
                            break;
                        }
                    }
                    // Later snapshots supersede the skipped ones
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "Connection {} lagged, skipped {} snapshots",
                            connection_id_clone,
                            skipped
                        );
                    }
                    Err(RecvError::Closed) => {
                        tracing::debug!("Broadcast channel closed for connection={}", connection_id_clone);
                        break;
                    }
                },
                direct = direct_rx.recv() => match direct {
                    Some(message) => {
                        if !send_message(&mut sender, &message).await {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
    });

    let recv_state = state.clone();
    let connection_id_clone = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            let result = match msg {
                Message::Text(text) => handle_text(&recv_state, &connection_id_clone, &text).await,
                Message::Binary(_) => Err(SyncError::MalformedMessage(
                    "binary frames are not supported".to_string(),
                )),
                Message::Close(_) => {
                    tracing::debug!("Close message from connection={}", connection_id_clone);
                    break;
                }
                // Axum answers protocol pings itself
                Message::Ping(_) | Message::Pong(_) => Ok(()),
            };

            if let Err(e) = result {
                tracing::warn!("Rejected message from connection={}: {}", connection_id_clone, e);
                if !queue_reply(&direct_tx, &connection_id_clone, ServerMessage::error(&e)) {
                    break;
                }
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => {
            tracing::debug!("Send task finished for connection={}", connection_id);
            recv_task.abort();
        }
        _ = &mut recv_task => {
            tracing::debug!("Receive task finished for connection={}", connection_id);
            send_task.abort();
        }
    }

    state.game_manager.write().await.disconnect(&connection_id);

    tracing::info!("WebSocket connection closed: connection={}", connection_id);
}

/// Decode and apply one text frame from `identity`
///
/// The write lock is held for the whole read-modify-broadcast step.
pub async fn handle_text(state: &AppState, identity: &str, text: &str) -> Result<(), SyncError> {
    let max = state.config.max_message_bytes;
    if text.len() > max {
        return Err(SyncError::MessageTooLarge {
            size: text.len(),
            max,
        });
    }

    tracing::debug!("Received from connection={}: {}", identity, text);

    let message = ClientMessage::parse(text)?;
    let mut manager = state.game_manager.write().await;
    manager.handle_message(identity, message)
}

/// Queue a reply for one participant without waiting
///
/// A participant that stops reading its socket while sending bad frames
/// fills the queue; further replies are dropped until it drains.
///
/// # Returns
///
/// False if the send side of the connection is gone
fn queue_reply(tx: &mpsc::Sender<ServerMessage>, identity: &str, message: ServerMessage) -> bool {
    match tx.try_send(message) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!("Reply queue full for connection={}, dropping reply", identity);
            true
        }
        Err(TrySendError::Closed(_)) => false,
    }
}

/// Serialize and send one message
///
/// # Returns
///
/// False if the socket is gone
async fn send_message(sender: &mut SplitSink<WebSocket, Message>, message: &ServerMessage) -> bool {
    match message.encode() {
        Ok(text) => sender.send(Message::Text(text)).await.is_ok(),
        Err(e) => {
            tracing::error!("Failed to encode message: {}", e);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        core::Player,
        models::PlayerUpdate,
    };

    fn test_state() -> AppState {
        AppState::new(Config {
            palette: vec!["c1".to_string(), "c2".to_string()],
            ..Config::default()
        })
    }

    #[tokio::test]
    async fn test_oversized_message_rejected() {
        let state = test_state();
        let text = "x".repeat(2000);

        let err = handle_text(&state, "conn", &text).await.unwrap_err();

        assert_eq!(err, SyncError::MessageTooLarge { size: 2000, max: 1024 });
    }

    #[tokio::test]
    async fn test_malformed_message_rejected() {
        let state = test_state();

        let err = handle_text(&state, "conn", "{\"type\":\"join\"}").await.unwrap_err();

        assert!(matches!(err, SyncError::MalformedMessage(_)));
    }

    #[tokio::test]
    async fn test_join_through_text_frame() {
        let state = test_state();
        let offer = state.game_manager.write().await.connect("conn").unwrap();
        let player = Player {
            id: offer.id.clone(),
            x: 100,
            y: 100,
            score: 0,
            color: offer.color.clone(),
        };
        let text = ClientMessage::Join(PlayerUpdate {
            player: player.clone(),
            coin: offer.coin,
        })
        .encode()
        .unwrap();

        tokio_test::assert_ok!(handle_text(&state, "conn", &text).await);

        let manager = state.game_manager.read().await;
        assert_eq!(manager.state().players["conn"], player);
        assert!(manager.state().coin.is_some());
    }

    #[tokio::test]
    async fn test_reply_queue_drops_when_full() {
        let (tx, mut rx) = mpsc::channel(DIRECT_REPLY_CAPACITY);

        for _ in 0..DIRECT_REPLY_CAPACITY * 4 {
            assert!(queue_reply(&tx, "conn", ServerMessage::error(&SyncError::NotJoined)));
        }

        let mut queued = 0;
        while rx.try_recv().is_ok() {
            queued += 1;
        }
        assert_eq!(queued, DIRECT_REPLY_CAPACITY);

        // Room again once drained
        assert!(queue_reply(&tx, "conn", ServerMessage::error(&SyncError::NotJoined)));
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_reply_queue_closed() {
        let (tx, rx) = mpsc::channel(DIRECT_REPLY_CAPACITY);
        drop(rx);

        assert!(!queue_reply(&tx, "conn", ServerMessage::error(&SyncError::NotJoined)));
    }
}
