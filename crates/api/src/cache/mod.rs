//! Per-tenant cache of read views.
//!
//! Dashboard metrics, the recent orders list and the public catalog pages are
//! read far more often than they change. Views are stored as ready-to-send
//! response bodies keyed by `(tenant, view)` and dropped by [`ViewCache::invalidate_for_event`]
//! whenever a domain event makes them stale.
//!
//! Each tenant has a generation counter that every invalidation bumps. A load
//! that started before an invalidation does not store its (possibly stale)
//! result.

use std::future::Future;
use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use serde::Serialize;
use storefront_core::event_types;
use storefront_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;

/// A cacheable read view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKey {
    DashboardMetrics,
    RecentOrders { limit: i64 },
    CatalogProducts,
    CatalogTheme,
    CatalogStylesheet,
}

impl ViewKey {
    /// Whether an event of `event_type` makes this view stale.
    pub fn is_stale_after(self, event_type: &str) -> bool {
        use ViewKey::*;
        match event_type {
            event_types::ORDER_CREATED | event_types::PRODUCT_UPDATED => matches!(
                self,
                DashboardMetrics | RecentOrders { .. } | CatalogProducts
            ),
            event_types::ORDER_STATUS_CHANGED => {
                matches!(self, DashboardMetrics | RecentOrders { .. })
            }
            event_types::THEME_SAVED => matches!(self, CatalogTheme | CatalogStylesheet),
            _ => false,
        }
    }
}

#[derive(Debug)]
struct CachedView {
    body: Bytes,
    stored_at: Instant,
}

#[derive(Debug)]
pub struct ViewCache {
    entries: DashMap<(DbId, ViewKey), CachedView>,
    generations: DashMap<DbId, u64>,
    ttl: Duration,
}

impl ViewCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            generations: DashMap::new(),
            ttl,
        }
    }

    /// A fresh cached view, if any. Expired entries are removed.
    pub fn get(&self, tenant_id: DbId, key: ViewKey) -> Option<Bytes> {
        let hit = self
            .entries
            .get(&(tenant_id, key))
            .map(|e| (e.body.clone(), e.stored_at.elapsed() < self.ttl));

        match hit {
            Some((body, true)) => Some(body),
            Some((_, false)) => {
                self.entries.remove(&(tenant_id, key));
                None
            }
            None => None,
        }
    }

    /// Serve `key` from the cache, or run `load`, cache and return its body.
    ///
    /// Load errors are returned as-is and nothing is cached.
    pub async fn get_or_load<F, Fut>(&self, tenant_id: DbId, key: ViewKey, load: F) -> AppResult<Bytes>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Bytes>>,
    {
        if let Some(body) = self.get(tenant_id, key) {
            tracing::trace!(tenant_id, ?key, "View cache hit");
            return Ok(body);
        }

        let generation = self.generation(tenant_id);
        let body = load().await?;
        self.insert_if_current(tenant_id, key, generation, body.clone());
        Ok(body)
    }

    /// Drop every view of `tenant_id` that `event_type` makes stale.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_for_event(&self, tenant_id: DbId, event_type: &str) -> usize {
        let mut generation = self.generations.entry(tenant_id).or_insert(0);
        *generation += 1;

        let mut removed = 0;
        self.entries.retain(|(tenant, key), _| {
            let stale = *tenant == tenant_id && key.is_stale_after(event_type);
            if stale {
                removed += 1;
            }
            !stale
        });
        drop(generation);

        if removed > 0 {
            tracing::debug!(tenant_id, event_type, removed, "Invalidated cached views");
        }
        removed
    }

    /// Remove expired entries. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, view| {
            let fresh = view.stored_at.elapsed() < self.ttl;
            if !fresh {
                removed += 1;
            }
            fresh
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn generation(&self, tenant_id: DbId) -> u64 {
        self.generations.get(&tenant_id).map_or(0, |g| *g)
    }

    fn insert_if_current(&self, tenant_id: DbId, key: ViewKey, generation: u64, body: Bytes) {
        // Holding the generation entry orders this insert against invalidation.
        let current = self.generations.entry(tenant_id).or_insert(0);
        if *current == generation {
            self.entries.insert(
                (tenant_id, key),
                CachedView {
                    body,
                    stored_at: Instant::now(),
                },
            );
        }
    }
}

/// Serialize a `{ "data": T }` envelope as a cacheable body.
pub fn data_body<T: Serialize>(data: T) -> AppResult<Bytes> {
    serde_json::to_vec(&DataResponse { data })
        .map(Bytes::from)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize view: {e}")))
}

/// Respond with a cached body of the given content type.
pub fn cached_response(content_type: &'static str, body: Bytes) -> Response {
    ([(CONTENT_TYPE, content_type)], body).into_response()
}
