use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::round::RoundEvent;

#[derive(Debug, thiserror::Error)]
pub enum SocketError {
    #[error("Send failed: {0}")]
    SendFailed(String),
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),
}

/// The client end of a round event stream
#[async_trait]
pub trait EventSocket: Send {
    async fn send_text(&mut self, text: String) -> Result<(), SocketError>;

    /// Next text message from the client, `Ok(None)` once it disconnects
    async fn receive_text(&mut self) -> Result<Option<String>, SocketError>;

    async fn close(&mut self) -> Result<(), SocketError>;
}

#[async_trait]
impl EventSocket for WebSocket {
    async fn send_text(&mut self, text: String) -> Result<(), SocketError> {
        self.send(Message::Text(text))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_text(&mut self) -> Result<Option<String>, SocketError> {
        loop {
            match self.recv().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // Ignore binary/ping/pong
                Some(Err(e)) => return Err(SocketError::ReceiveFailed(e.to_string())),
            }
        }
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// Writes every round event of a session to the socket as JSON.
///
/// Returns when the client disconnects or the session is removed.
pub async fn forward_events<S: EventSocket>(
    session_id: &str,
    socket: &mut S,
    mut events: broadcast::Receiver<RoundEvent>,
) {
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            warn!(session_id = %session_id, error = %e, "Failed to serialize round event");
                            continue;
                        }
                    };

                    if let Err(e) = socket.send_text(text).await {
                        warn!(session_id = %session_id, error = %e, "Failed to send round event");
                        break;
                    }
                    debug!(session_id = %session_id, event_type = event.event_type(), "Round event sent");
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(session_id = %session_id, skipped, "Event stream lagged, events dropped");
                }
                Err(RecvError::Closed) => {
                    info!(session_id = %session_id, "Session removed, closing event stream");
                    if let Err(e) = socket.close().await {
                        debug!(session_id = %session_id, error = %e, "Close frame not delivered");
                    }
                    break;
                }
            },
            message = socket.receive_text() => match message {
                Ok(Some(text)) => {
                    debug!(session_id = %session_id, message = %text, "Ignoring client message");
                }
                Ok(None) => {
                    info!(session_id = %session_id, "Event stream client disconnected");
                    break;
                }
                Err(e) => {
                    warn!(session_id = %session_id, error = %e, "Event stream receive failed");
                    break;
                }
            },
        }
    }
}
