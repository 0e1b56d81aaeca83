//! Wire messages exchanged with the editor and preview surfaces.
//!
//! Every message is a JSON object `{ "type": ..., "payload": ... }`. The
//! broadcast to previews always carries the full document, never a delta.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::css::{FontStylesheet, ThemeTokens};
use super::document::{FieldIssue, ThemeConfig};
use super::save_status::SaveStatus;
use crate::error::CoreError;

pub const THEME_UPDATE: &str = "THEME_UPDATE";
pub const THEME_EDIT: &str = "THEME_EDIT";
pub const THEME_SAVE: &str = "THEME_SAVE";
pub const THEME_TOKENS: &str = "THEME_TOKENS";
pub const SAVE_STATUS: &str = "SAVE_STATUS";
pub const ERROR: &str = "ERROR";

/// A single field-level change, e.g. `{ "path": "colors.primary", "value": "#ff0000" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEdit {
    pub path: String,
    pub value: Value,
}

/// Messages an editor surface may send.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum EditorMessage {
    /// Replace the working document (full or partial).
    #[serde(rename = "THEME_UPDATE")]
    Update(Value),
    /// Change one field.
    #[serde(rename = "THEME_EDIT")]
    Edit(FieldEdit),
    /// Persist the working document.
    #[serde(rename = "THEME_SAVE")]
    Save,
}

/// Parse an inbound editor frame, rejecting unknown types and bad shapes.
pub fn parse_editor_message(text: &str) -> Result<EditorMessage, CoreError> {
    serde_json::from_str(text)
        .map_err(|e| CoreError::Validation(format!("Invalid editor message: {e}")))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensPayload {
    pub css_variables: ThemeTokens,
    /// Stylesheets the surface has not injected yet.
    pub font_stylesheets: Vec<FontStylesheet>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStatusPayload {
    pub status: SaveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FieldIssue>,
}

/// Messages sent from the server to a surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum SurfaceMessage {
    #[serde(rename = "THEME_UPDATE")]
    Update(ThemeConfig),
    #[serde(rename = "THEME_TOKENS")]
    Tokens(TokensPayload),
    #[serde(rename = "SAVE_STATUS")]
    SaveStatus(SaveStatusPayload),
    #[serde(rename = "ERROR")]
    Error(ErrorPayload),
}

impl SurfaceMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self::rejected(message, Vec::new())
    }

    /// An error naming the document fields that were refused.
    pub fn rejected(message: impl Into<String>, issues: Vec<FieldIssue>) -> Self {
        SurfaceMessage::Error(ErrorPayload {
            message: message.into(),
            issues,
        })
    }

    /// Serialize to a text frame.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"type":"{ERROR}","payload":{{"message":"serialization failed"}}}}"#)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn parses_update_with_partial_payload() {
        let msg = parse_editor_message(
            r##"{"type":"THEME_UPDATE","payload":{"colors":{"primary":"#ff0000"}}}"##,
        )
        .unwrap();
        assert_matches!(msg, EditorMessage::Update(v) if v["colors"]["primary"] == "#ff0000");
    }

    #[test]
    fn parses_field_edit() {
        let msg = parse_editor_message(
            r#"{"type":"THEME_EDIT","payload":{"path":"header.shadow","value":false}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            EditorMessage::Edit(FieldEdit {
                path: "header.shadow".to_string(),
                value: json!(false),
            })
        );
    }

    #[test]
    fn parses_save_without_payload() {
        assert_eq!(
            parse_editor_message(r#"{"type":"THEME_SAVE"}"#).unwrap(),
            EditorMessage::Save
        );
    }

    #[test]
    fn rejects_unknown_type() {
        assert_matches!(
            parse_editor_message(r#"{"type":"RELOAD","payload":{}}"#),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn rejects_non_json() {
        assert!(parse_editor_message("not json").is_err());
    }

    #[test]
    fn update_broadcast_has_type_and_full_payload() {
        let value: Value =
            serde_json::from_str(&SurfaceMessage::Update(ThemeConfig::default()).to_json())
                .unwrap();
        assert_eq!(value["type"], THEME_UPDATE);
        for section in ["colors", "typography", "header", "banner"] {
            assert!(value["payload"][section].is_object(), "missing {section}");
        }
    }

    #[test]
    fn error_lists_issues_only_when_present() {
        let plain: Value = serde_json::from_str(&SurfaceMessage::error("nope").to_json()).unwrap();
        assert_eq!(plain["type"], ERROR);
        assert!(plain["payload"].get("issues").is_none());

        let rejected = SurfaceMessage::rejected(
            "Invalid theme configuration",
            vec![FieldIssue {
                path: "colors.primary".to_string(),
                reason: "expected a hex color".to_string(),
            }],
        );
        let value: Value = serde_json::from_str(&rejected.to_json()).unwrap();
        assert_eq!(value["payload"]["issues"][0]["path"], "colors.primary");
    }

    #[test]
    fn save_status_serializes_lowercase() {
        let msg = SurfaceMessage::SaveStatus(SaveStatusPayload {
            status: SaveStatus::Success,
            version: Some(4),
            warning: None,
        });
        let value: Value = serde_json::from_str(&msg.to_json()).unwrap();
        assert_eq!(value["type"], SAVE_STATUS);
        assert_eq!(value["payload"]["status"], "success");
        assert_eq!(value["payload"]["version"], 4);
        assert!(value["payload"].get("warning").is_none());
    }
}
