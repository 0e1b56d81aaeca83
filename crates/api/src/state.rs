use std::sync::Arc;

use storefront_events::{EventBus, PlatformEvent, ThemeChannel};

use crate::cache::ViewCache;
use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: storefront_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (theme editor and preview sessions).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for publishing platform events.
    pub event_bus: Arc<EventBus>,
    /// Origin-checked, per-tenant theme broadcast.
    pub theme_channel: Arc<ThemeChannel>,
    /// Cached read views, keyed by tenant.
    pub view_cache: Arc<ViewCache>,
}

impl AppState {
    /// Publish a domain event.
    ///
    /// Cached views the event makes stale are dropped before the event is
    /// fanned out, so a read issued after the write returns fresh data.
    pub fn publish(&self, event: PlatformEvent) {
        if let Some(tenant_id) = event.tenant_id {
            self.view_cache.invalidate_for_event(tenant_id, &event.event_type);
        }
        self.event_bus.publish(event);
    }
}
