use std::time::Duration;

use storefront_core::product::DEFAULT_LOW_STOCK_THRESHOLD;
use storefront_core::stock::StockPolicy;
use storefront_core::tracking::DEFAULT_TRACKING_TIMEOUT_MS;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on waiting for background tasks during shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Origins allowed to publish and receive theme broadcasts.
    pub theme_allowed_origins: Vec<String>,
    /// What happens when an order takes stock below zero.
    pub stock_policy: StockPolicy,
    /// Upper bound on a catalog tracking write, in milliseconds.
    pub tracking_timeout_ms: u64,
    /// Stock level at or below which a product counts as low on the dashboard.
    pub low_stock_threshold: i32,
    /// How long a cached view may be served, in seconds.
    pub view_cache_ttl_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                      |
    /// |-------------------------|------------------------------|
    /// | `HOST`                  | `0.0.0.0`                    |
    /// | `PORT`                  | `3000`                       |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`      |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                         |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                         |
    /// | `THEME_ALLOWED_ORIGINS` | value of `CORS_ORIGINS`      |
    /// | `STOCK_POLICY`          | `allow_negative`             |
    /// | `TRACKING_TIMEOUT_MS`   | `800`                        |
    /// | `LOW_STOCK_THRESHOLD`   | `5`                          |
    /// | `VIEW_CACHE_TTL_SECS`   | `60`                         |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let theme_allowed_origins = std::env::var("THEME_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|_| cors_origins.clone());

        let stock_policy: StockPolicy = std::env::var("STOCK_POLICY")
            .unwrap_or_else(|_| StockPolicy::default().as_str().into())
            .parse()
            .expect("STOCK_POLICY must be `allow_negative` or `clamp_at_zero`");

        let tracking_timeout_ms: u64 = std::env::var("TRACKING_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TRACKING_TIMEOUT_MS.to_string())
            .parse()
            .expect("TRACKING_TIMEOUT_MS must be a valid u64");

        let low_stock_threshold: i32 = std::env::var("LOW_STOCK_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_LOW_STOCK_THRESHOLD.to_string())
            .parse()
            .expect("LOW_STOCK_THRESHOLD must be a valid i32");

        let view_cache_ttl_secs: u64 = std::env::var("VIEW_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("VIEW_CACHE_TTL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            theme_allowed_origins,
            stock_policy,
            tracking_timeout_ms,
            low_stock_threshold,
            view_cache_ttl_secs,
        }
    }

    pub fn tracking_timeout(&self) -> Duration {
        Duration::from_millis(self.tracking_timeout_ms)
    }

    pub fn view_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.view_cache_ttl_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
