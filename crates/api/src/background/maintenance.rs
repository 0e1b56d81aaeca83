//! Periodic housekeeping of in-memory state.
//!
//! Sweeps expired view cache entries and drops theme channels whose previews
//! have all disconnected.

use std::sync::Arc;
use std::time::Duration;

use storefront_events::ThemeChannel;
use tokio_util::sync::CancellationToken;

use crate::cache::ViewCache;

/// How often the sweep runs.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Run the sweep loop until `cancel` is triggered.
pub async fn run(
    view_cache: Arc<ViewCache>,
    theme_channel: Arc<ThemeChannel>,
    cancel: CancellationToken,
) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Maintenance job started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Maintenance job stopping");
                break;
            }
            _ = interval.tick() => {
                sweep(&view_cache, &theme_channel).await;
            }
        }
    }
}

/// One sweep. Returns `(cache entries removed, theme channels pruned)`.
pub async fn sweep(view_cache: &ViewCache, theme_channel: &ThemeChannel) -> (usize, usize) {
    let expired = view_cache.sweep_expired();
    let pruned = theme_channel.prune_idle().await;
    if expired > 0 || pruned > 0 {
        tracing::debug!(expired, pruned, "Maintenance: swept idle state");
    }
    (expired, pruned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::theme::ThemeConfig;

    #[tokio::test]
    async fn sweep_drops_idle_channels_and_expired_views() {
        let cache = ViewCache::new(Duration::ZERO);
        cache
            .get_or_load(1, crate::cache::ViewKey::CatalogTheme, || async {
                crate::cache::data_body(ThemeConfig::default())
            })
            .await
            .unwrap();

        let channel = ThemeChannel::new(["http://localhost:5173"]);
        drop(channel.subscribe(1).await);
        let _live = channel.subscribe(2).await;

        assert_eq!(sweep(&cache, &channel).await, (1, 1));
        assert_eq!(channel.subscriber_count(2).await, 1);
    }

    #[tokio::test]
    async fn run_stops_on_cancel() {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(
            Arc::new(ViewCache::new(Duration::from_secs(60))),
            Arc::new(ThemeChannel::new(Vec::<String>::new())),
            cancel.clone(),
        ));
        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("maintenance job should stop")
            .unwrap();
    }
}
