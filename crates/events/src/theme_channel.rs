//! Per-tenant broadcast of theme documents between editor and preview
//! sessions.
//!
//! Every message carries the full, already-merged document, so a preview
//! that lags or misses messages still converges on the latest one. Publishing
//! requires an origin on the configured allow-list; a rejected origin never
//! reaches any subscriber.

use std::collections::HashMap;
use std::sync::Arc;

use storefront_core::theme::ThemeConfig;
use storefront_core::types::DbId;
use tokio::sync::{broadcast, RwLock};

/// Per-tenant buffer. Previews only care about the newest document, so a
/// small buffer is enough; laggards skip ahead.
const DEFAULT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    #[error("Origin header is required")]
    MissingOrigin,

    #[error("Origin '{0}' is not allowed")]
    OriginNotAllowed(String),
}

/// One published document.
#[derive(Debug, Clone)]
pub struct ThemeBroadcast {
    pub tenant_id: DbId,
    pub config: Arc<ThemeConfig>,
}

/// Typed, origin-checked theme channel shared via `Arc<ThemeChannel>`.
pub struct ThemeChannel {
    allowed_origins: Vec<String>,
    capacity: usize,
    senders: RwLock<HashMap<DbId, broadcast::Sender<ThemeBroadcast>>>,
}

impl ThemeChannel {
    /// Build a channel accepting exactly `allowed_origins`.
    ///
    /// A wildcard entry (`*`) is ignored: every origin must be listed.
    pub fn new<I, S>(allowed_origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_origins = allowed_origins
            .into_iter()
            .filter_map(|o| {
                let normalized = normalize_origin(o.as_ref());
                if normalized == "*" {
                    tracing::warn!("Ignoring wildcard theme origin; list origins explicitly");
                    None
                } else if normalized.is_empty() {
                    None
                } else {
                    Some(normalized)
                }
            })
            .collect();

        Self {
            allowed_origins,
            capacity: DEFAULT_CAPACITY,
            senders: RwLock::new(HashMap::new()),
        }
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Check an `Origin` header value against the allow-list.
    pub fn check_origin(&self, origin: Option<&str>) -> Result<(), ChannelError> {
        let origin = origin.ok_or(ChannelError::MissingOrigin)?;
        let normalized = normalize_origin(origin);
        if self.allowed_origins.iter().any(|o| *o == normalized) {
            Ok(())
        } else {
            Err(ChannelError::OriginNotAllowed(origin.to_string()))
        }
    }

    /// Receive every document published for `tenant_id` from now on.
    pub async fn subscribe(&self, tenant_id: DbId) -> broadcast::Receiver<ThemeBroadcast> {
        if let Some(sender) = self.senders.read().await.get(&tenant_id) {
            return sender.subscribe();
        }
        let mut senders = self.senders.write().await;
        senders
            .entry(tenant_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Publish a full document to the tenant's previews.
    ///
    /// Returns how many subscribers received it. Zero subscribers is not an
    /// error: broadcasts are fire-and-forget.
    pub async fn publish(
        &self,
        tenant_id: DbId,
        origin: Option<&str>,
        config: Arc<ThemeConfig>,
    ) -> Result<usize, ChannelError> {
        self.check_origin(origin)?;

        let delivered = {
            let senders = self.senders.read().await;
            match senders.get(&tenant_id) {
                Some(sender) => sender
                    .send(ThemeBroadcast { tenant_id, config })
                    .unwrap_or(0),
                None => 0,
            }
        };

        if delivered == 0 {
            self.prune(tenant_id).await;
        }
        Ok(delivered)
    }

    /// Number of live preview subscriptions for a tenant.
    pub async fn subscriber_count(&self, tenant_id: DbId) -> usize {
        self.senders
            .read()
            .await
            .get(&tenant_id)
            .map_or(0, broadcast::Sender::receiver_count)
    }

    /// Drop every tenant entry that has no subscribers left.
    pub async fn prune_idle(&self) -> usize {
        let mut senders = self.senders.write().await;
        let before = senders.len();
        senders.retain(|_, s| s.receiver_count() > 0);
        before - senders.len()
    }

    async fn prune(&self, tenant_id: DbId) {
        let mut senders = self.senders.write().await;
        if senders
            .get(&tenant_id)
            .is_some_and(|s| s.receiver_count() == 0)
        {
            senders.remove(&tenant_id);
        }
    }
}

/// Lowercase, trimmed, without a trailing slash.
fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_ascii_lowercase()
}
