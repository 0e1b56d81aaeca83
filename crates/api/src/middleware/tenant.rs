//! Tenant extractor for admin endpoints.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;

use crate::error::AppError;

/// Header carrying the tenant id on admin requests.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// The tenant a request acts on.
///
/// ```ignore
/// async fn my_handler(TenantId(tenant_id): TenantId) -> AppResult<Json<()>> {
///     tracing::info!(tenant_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Use `Option<TenantId>` where a missing tenant must be reported in a
/// handler-specific way; a malformed header is still rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantId(pub DbId);

impl TenantId {
    /// Parse the header value if present.
    pub fn from_parts(parts: &Parts) -> Result<Option<Self>, AppError> {
        let Some(raw) = parts.headers.get(TENANT_HEADER) else {
            return Ok(None);
        };
        raw.to_str()
            .ok()
            .and_then(|v| v.trim().parse::<DbId>().ok())
            .filter(|id| *id > 0)
            .map(|id| Some(TenantId(id)))
            .ok_or_else(|| {
                AppError::BadRequest(format!("{TENANT_HEADER} must be a positive integer"))
            })
    }
}

impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts)?.ok_or_else(|| {
            AppError::Core(CoreError::Validation("Tenant id is required".into()))
        })
    }
}

impl<S> OptionalFromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Self::from_parts(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/orders/recent");
        if let Some(value) = header {
            builder = builder.header(TENANT_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn parses_present_header() {
        assert_eq!(TenantId::from_parts(&parts(Some(" 42 "))).unwrap(), Some(TenantId(42)));
    }

    #[test]
    fn absent_header_is_none() {
        assert_eq!(TenantId::from_parts(&parts(None)).unwrap(), None);
    }

    #[test]
    fn malformed_header_is_rejected() {
        assert!(TenantId::from_parts(&parts(Some("abc"))).is_err());
        assert!(TenantId::from_parts(&parts(Some("0"))).is_err());
    }
}
