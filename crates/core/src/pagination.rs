//! Limit clamping shared by list endpoints.

/// Default number of orders returned by the recent-orders read model.
pub const DEFAULT_RECENT_ORDERS: i64 = 10;

/// Default number of entries in the dashboard activity feeds.
pub const DEFAULT_ACTIVITY_LIMIT: i64 = 20;

/// Upper bound for any list endpoint.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 10, 100), 10);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(500), 10, 100), 100);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), 10, 100), 1);
        assert_eq!(clamp_limit(Some(-3), 10, 100), 1);
    }
}
