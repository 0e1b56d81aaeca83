//! Catalog analytics events (product views, WhatsApp clicks).
//!
//! Tracking is best-effort: callers time-box the write and swallow any
//! failure so it never blocks the shopper's primary action.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Default upper bound on a single tracking write, in milliseconds.
pub const DEFAULT_TRACKING_TIMEOUT_MS: u64 = 800;

/// Largest accepted `metadata` object, in serialized bytes.
pub const MAX_METADATA_BYTES: usize = 4 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogEventKind {
    ProductView,
    WhatsappClick,
}

impl CatalogEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProductView => "product_view",
            Self::WhatsappClick => "whatsapp_click",
        }
    }
}

/// Body of `POST /catalog/{slug}/track`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub event: CatalogEventKind,
    pub product_id: Option<DbId>,
    pub metadata: Option<serde_json::Value>,
}

/// Check a tracking request before it is written.
pub fn validate_track_request(req: &TrackRequest) -> Result<(), CoreError> {
    if req.event == CatalogEventKind::ProductView && req.product_id.is_none() {
        return Err(CoreError::Validation(
            "product_view events require a productId".to_string(),
        ));
    }
    if let Some(meta) = &req.metadata {
        if !meta.is_object() {
            return Err(CoreError::Validation(
                "metadata must be a JSON object".to_string(),
            ));
        }
        if meta.to_string().len() > MAX_METADATA_BYTES {
            return Err(CoreError::Validation(format!(
                "metadata must not exceed {MAX_METADATA_BYTES} bytes"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> TrackRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn whatsapp_click_without_product_is_valid() {
        let req = parse(json!({"event": "whatsapp_click"}));
        assert_eq!(req.event, CatalogEventKind::WhatsappClick);
        assert!(validate_track_request(&req).is_ok());
    }

    #[test]
    fn product_view_requires_product() {
        let req = parse(json!({"event": "product_view"}));
        assert_matches!(validate_track_request(&req), Err(CoreError::Validation(_)));

        let req = parse(json!({"event": "product_view", "productId": 7}));
        assert!(validate_track_request(&req).is_ok());
    }

    #[test]
    fn metadata_must_be_an_object() {
        let req = parse(json!({"event": "whatsapp_click", "metadata": [1, 2]}));
        assert_matches!(validate_track_request(&req), Err(CoreError::Validation(_)));
    }

    #[test]
    fn unknown_event_kind_fails_to_parse() {
        let result: Result<TrackRequest, _> = serde_json::from_value(json!({"event": "cart_add"}));
        assert!(result.is_err());
    }

    #[test]
    fn kind_names_match_wire_form() {
        for kind in [CatalogEventKind::ProductView, CatalogEventKind::WhatsappClick] {
            assert_eq!(json!(kind), json!(kind.as_str()));
        }
    }
}
