use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::round::RoundEvent;

/// Buffered events per session before slow subscribers start lagging
const SESSION_CHANNEL_CAPACITY: usize = 100;

/// Distributes round events to whoever renders a session (the map widget, tests, logs)
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    /// Session-specific event channels: session_id -> sender
    session_channels: Arc<RwLock<HashMap<String, broadcast::Sender<RoundEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits an event to all subscribers of a session
    pub async fn emit_to_session(&self, session_id: &str, event: RoundEvent) {
        let channels = self.session_channels.read().await;

        let Some(sender) = channels.get(session_id) else {
            debug!(
                session_id = %session_id,
                event_type = event.event_type(),
                "No subscribers for session, dropping event"
            );
            return;
        };

        match sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    session_id = %session_id,
                    receivers = receiver_count,
                    "Round event emitted"
                );
            }
            Err(_) => {
                debug!(session_id = %session_id, "Round event emitted with no receivers");
            }
        }
    }

    pub async fn emit_all(&self, session_id: &str, events: Vec<RoundEvent>) {
        for event in events {
            self.emit_to_session(session_id, event).await;
        }
    }

    /// Subscribe to events for a session
    pub async fn subscribe(&self, session_id: &str) -> broadcast::Receiver<RoundEvent> {
        let mut channels = self.session_channels.write().await;

        channels
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!(session_id = %session_id, "Creating new session channel for subscription");
                broadcast::channel(SESSION_CHANNEL_CAPACITY).0
            })
            .subscribe()
    }

    /// Drops the channel of a removed session; open receivers see the stream close
    pub async fn close_session(&self, session_id: &str) {
        if self.session_channels.write().await.remove(session_id).is_some() {
            debug!(session_id = %session_id, "Session channel closed");
        }
    }
}
