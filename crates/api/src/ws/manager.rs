use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use storefront_core::types::{DbId, Timestamp};
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Which theme surface a connection serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Editor,
    Preview,
}

impl Surface {
    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Editor => "editor",
            Surface::Preview => "preview",
        }
    }
}

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Tenant whose theme the connection edits or previews.
    pub tenant_id: DbId,
    pub surface: Surface,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active WebSocket connections.
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
    /// Returns the sender the session uses for its own replies and the
    /// receiver half the caller forwards to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        tenant_id: DbId,
        surface: Surface,
    ) -> (WsSender, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            tenant_id,
            surface,
            sender: tx.clone(),
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        (tx, rx)
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        if let Some(conn) = self.connections.write().await.remove(conn_id) {
            let duration_secs = (chrono::Utc::now() - conn.connected_at).num_seconds();
            tracing::debug!(
                conn_id,
                tenant_id = conn.tenant_id,
                surface = conn.surface.as_str(),
                duration_secs,
                "WebSocket connection removed",
            );
        }
    }

    /// Number of open connections of one surface kind for a tenant.
    pub async fn count_for_tenant(&self, tenant_id: DbId, surface: Surface) -> usize {
        self.connections
            .read()
            .await
            .values()
            .filter(|c| c.tenant_id == tenant_id && c.surface == surface)
            .count()
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
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
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
