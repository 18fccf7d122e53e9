use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use skydd_core::types::{DbId, Timestamp};
use skydd_events::{ChangeEvent, ChannelFilter};
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Authenticated subject: the customer id, or the staff id for admins.
    pub user_id: DbId,
    /// Admins may subscribe to any customer's feed.
    pub is_admin: bool,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// Active subscriptions by client-chosen id.
    pub subscriptions: HashMap<String, ChannelFilter>,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active WebSocket connections and their subscriptions.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        user_id: DbId,
        is_admin: bool,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            is_admin,
            sender: tx,
            subscriptions: HashMap::new(),
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection and all of its subscriptions.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Register (or replace) a subscription on a connection.
    ///
    /// Returns `false` if the connection is unknown (already torn down).
    pub async fn subscribe(&self, conn_id: &str, sub_id: String, filter: ChannelFilter) -> bool {
        let mut conns = self.connections.write().await;
        match conns.get_mut(conn_id) {
            Some(conn) => {
                conn.subscriptions.insert(sub_id, filter);
                true
            }
            None => false,
        }
    }

    /// Drop a subscription by its client-chosen id.
    ///
    /// A no-op for unknown connection or subscription ids; after it
    /// returns, no further invalidations are delivered for that id.
    pub async fn unsubscribe(&self, conn_id: &str, sub_id: &str) {
        if let Some(conn) = self.connections.write().await.get_mut(conn_id) {
            conn.subscriptions.remove(sub_id);
        }
    }

    /// Deliver a change event to every subscription whose filter matches.
    ///
    /// Returns the number of invalidation messages sent. Connections whose
    /// send channels are closed are silently skipped (they will be cleaned
    /// up on their next receive loop iteration).
    pub async fn route(&self, event: &ChangeEvent) -> usize {
        let conns = self.connections.read().await;
        let mut delivered = 0;
        for conn in conns.values() {
            for (sub_id, filter) in &conn.subscriptions {
                if !filter.matches(event) {
                    continue;
                }
                let msg = serde_json::json!({
                    "type": "change",
                    "id": sub_id,
                    "table": event.table,
                    "op": event.op,
                    "entity_id": event.entity_id,
                    "query_groups": event.query_groups(),
                });
                if conn.sender.send(Message::Text(msg.to_string().into())).is_ok() {
                    delivered += 1;
                }
            }
        }
        delivered
    }

    /// Send a message to one connection. Silently dropped if the
    /// connection is unknown or its channel is closed.
    pub async fn send_to_connection(&self, conn_id: &str, message: Message) {
        if let Some(conn) = self.connections.read().await.get(conn_id) {
            let _ = conn.sender.send(message);
        }
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
