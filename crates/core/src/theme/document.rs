//! The theme configuration document and its defaulting merge.
//!
//! A stored or transmitted document may be partial, empty, or carry values
//! from an older editor. [`ThemeConfig::merge`] always produces a document
//! with all four sections populated: each present-and-valid field is kept,
//! every other field falls back to its default *individually*. Fields that
//! were present but invalid are reported as [`FieldIssue`]s so callers can
//! decide whether to warn (load) or reject (save).

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Font family that ships with the catalog; never injected as a stylesheet.
pub const DEFAULT_FONT: &str = "Inter";

/// Maximum banner overlay opacity (percent).
pub const MAX_OVERLAY_OPACITY: u8 = 100;

/// Maximum number of banner images.
pub const MAX_BANNER_IMAGES: usize = 10;

pub const SECTION_COLORS: &str = "colors";
pub const SECTION_TYPOGRAPHY: &str = "typography";
pub const SECTION_HEADER: &str = "header";
pub const SECTION_BANNER: &str = "banner";

/// Wire names of the `colors` section fields.
pub const COLOR_FIELDS: &[&str] = &[
    "primary",
    "secondary",
    "background",
    "cardBackground",
    "textPrimary",
    "textSecondary",
];

/// Wire names of the `typography` section fields.
pub const TYPOGRAPHY_FIELDS: &[&str] = &["fontHeading", "fontBody", "borderRadius", "buttonStyle"];

/// Wire names of the `header` section fields.
pub const HEADER_FIELDS: &[&str] = &[
    "style",
    "backgroundColor",
    "textColor",
    "showSearch",
    "showPromo",
    "menuPosition",
    "height",
    "shadow",
];

/// Wire names of the `banner` section fields.
pub const BANNER_FIELDS: &[&str] = &[
    "isActive",
    "type",
    "images",
    "title",
    "subtitle",
    "textColor",
    "textPosition",
    "overlayOpacity",
    "ctaText",
    "height",
    "autoplay",
];

static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex")
});

static FONT_FAMILY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9 \-]{1,64}$").expect("valid regex"));

static CSS_LENGTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?(?:px|rem|em|%)$").expect("valid regex"));

/// Whether `value` is a `#rgb` or `#rrggbb` hex color.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}

/// Whether `value` is a plain font family name: letters, digits, spaces and
/// dashes, at most 64 characters.
pub fn is_font_family(value: &str) -> bool {
    FONT_FAMILY_RE.is_match(value)
}

/// Whether `value` is a CSS length such as `8px`, `0.5rem` or `50%`.
pub fn is_css_length(value: &str) -> bool {
    CSS_LENGTH_RE.is_match(value)
}

/// Known fields for a section name, or `None` for an unknown section.
pub fn section_fields(section: &str) -> Option<&'static [&'static str]> {
    match section {
        SECTION_COLORS => Some(COLOR_FIELDS),
        SECTION_TYPOGRAPHY => Some(TYPOGRAPHY_FIELDS),
        SECTION_HEADER => Some(HEADER_FIELDS),
        SECTION_BANNER => Some(BANNER_FIELDS),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ButtonStyle {
    #[default]
    Filled,
    Outlined,
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum HeaderStyle {
    #[default]
    Simple,
    Centered,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MenuPosition {
    #[default]
    Center,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum HeaderHeight {
    Small,
    #[default]
    Normal,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum BannerType {
    #[default]
    Image,
    Carousel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TextPosition {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum BannerHeight {
    Small,
    #[default]
    Medium,
    Large,
    Full,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Named color roles, each a hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub card_background: String,
    pub text_primary: String,
    pub text_secondary: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#0f172a".to_string(),
            secondary: "#64748b".to_string(),
            background: "#ffffff".to_string(),
            card_background: "#ffffff".to_string(),
            text_primary: "#0f172a".to_string(),
            text_secondary: "#64748b".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ThemeTypography {
    pub font_heading: String,
    pub font_body: String,
    /// A CSS length token such as `0.5rem`.
    pub border_radius: String,
    pub button_style: ButtonStyle,
}

impl Default for ThemeTypography {
    fn default() -> Self {
        Self {
            font_heading: DEFAULT_FONT.to_string(),
            font_body: DEFAULT_FONT.to_string(),
            border_radius: "0.5rem".to_string(),
            button_style: ButtonStyle::Filled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ThemeHeader {
    pub style: HeaderStyle,
    pub background_color: String,
    pub text_color: String,
    pub show_search: bool,
    pub show_promo: bool,
    pub menu_position: MenuPosition,
    pub height: HeaderHeight,
    pub shadow: bool,
}

impl Default for ThemeHeader {
    fn default() -> Self {
        Self {
            style: HeaderStyle::Simple,
            background_color: "#ffffff".to_string(),
            text_color: "#0f172a".to_string(),
            show_search: true,
            show_promo: false,
            menu_position: MenuPosition::Center,
            height: HeaderHeight::Normal,
            shadow: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ThemeBanner {
    pub is_active: bool,
    #[serde(rename = "type")]
    pub banner_type: BannerType,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub subtitle: Option<String>,
    pub text_color: String,
    pub text_position: TextPosition,
    /// Percent, `0..=100`.
    pub overlay_opacity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cta_text: Option<String>,
    pub height: BannerHeight,
    pub autoplay: bool,
}

impl Default for ThemeBanner {
    fn default() -> Self {
        Self {
            is_active: false,
            banner_type: BannerType::Image,
            images: Vec::new(),
            title: None,
            subtitle: None,
            text_color: "#ffffff".to_string(),
            text_position: TextPosition::Center,
            overlay_opacity: 40,
            cta_text: None,
            height: BannerHeight::Medium,
            autoplay: true,
        }
    }
}

/// The complete per-tenant theme document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ThemeConfig {
    pub colors: ThemeColors,
    pub typography: ThemeTypography,
    pub header: ThemeHeader,
    pub banner: ThemeBanner,
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// A field that was present in the input but could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Dotted path, e.g. `colors.primary`.
    pub path: String,
    pub reason: String,
}

/// Result of merging an arbitrary JSON value over the defaults.
#[derive(Debug, Clone)]
pub struct MergedTheme {
    pub config: ThemeConfig,
    pub issues: Vec<FieldIssue>,
}

impl MergedTheme {
    /// Fail with a validation error listing every rejected field.
    pub fn into_strict(self) -> Result<ThemeConfig, CoreError> {
        if self.issues.is_empty() {
            return Ok(self.config);
        }
        let detail = self
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.path, i.reason))
            .collect::<Vec<_>>()
            .join("; ");
        Err(CoreError::Validation(format!(
            "Invalid theme configuration: {detail}"
        )))
    }
}

/// Reads one section object field by field, recording issues.
struct SectionReader<'a> {
    section: &'static str,
    fields: Option<&'a Map<String, Value>>,
    issues: &'a mut Vec<FieldIssue>,
}

impl<'a> SectionReader<'a> {
    fn new(root: Option<&'a Map<String, Value>>, section: &'static str, issues: &'a mut Vec<FieldIssue>) -> Self {
        let fields = match root.and_then(|r| r.get(section)) {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                issues.push(FieldIssue {
                    path: section.to_string(),
                    reason: "section must be an object".to_string(),
                });
                None
            }
        };
        Self {
            section,
            fields,
            issues,
        }
    }

    fn raw(&self, key: &str) -> Option<&'a Value> {
        match self.fields.and_then(|f| f.get(key)) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    fn reject(&mut self, key: &str, reason: impl Into<String>) {
        self.issues.push(FieldIssue {
            path: format!("{}.{key}", self.section),
            reason: reason.into(),
        });
    }

    /// Any deserializable field (enums, bools, string lists).
    fn value<T: DeserializeOwned>(&mut self, key: &str, default: T) -> T {
        let Some(raw) = self.raw(key) else {
            return default;
        };
        match serde_json::from_value::<T>(raw.clone()) {
            Ok(v) => v,
            Err(e) => {
                self.reject(key, e.to_string());
                default
            }
        }
    }

    fn text(&mut self, key: &str, default: String) -> String {
        match self.raw(key) {
            None => default,
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::String(_)) => {
                self.reject(key, "must not be empty");
                default
            }
            Some(_) => {
                self.reject(key, "must be a string");
                default
            }
        }
    }

    /// A text field that must also pass `accept`, which names the expected
    /// form in the issue.
    fn checked_text(
        &mut self,
        key: &str,
        default: String,
        accept: fn(&str) -> bool,
        expected: &str,
    ) -> String {
        let value = self.text(key, default.clone());
        if accept(&value) {
            value
        } else {
            self.reject(key, format!("expected {expected}, got {value:?}"));
            default
        }
    }

    fn optional_text(&mut self, key: &str) -> Option<String> {
        match self.raw(key) {
            None => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.reject(key, "must be a string");
                None
            }
        }
    }

    fn color(&mut self, key: &str, default: String) -> String {
        match self.raw(key) {
            None => default,
            Some(Value::String(s)) if is_hex_color(s.trim()) => s.trim().to_ascii_lowercase(),
            Some(other) => {
                self.reject(key, format!("expected a hex color, got {other}"));
                default
            }
        }
    }

    fn opacity(&mut self, key: &str, default: u8) -> u8 {
        let Some(raw) = self.raw(key) else {
            return default;
        };
        match raw.as_f64() {
            Some(n) if (0.0..=f64::from(MAX_OVERLAY_OPACITY)).contains(&n) => n.round() as u8,
            Some(n) => {
                self.reject(key, format!("must be between 0 and {MAX_OVERLAY_OPACITY}, got {n}"));
                default
            }
            None => {
                self.reject(key, "must be a number");
                default
            }
        }
    }
}

impl ThemeConfig {
    /// Merge an arbitrary JSON value over the defaults, field by field.
    pub fn merge(input: &Value) -> MergedTheme {
        let mut issues = Vec::new();
        let root = match input {
            Value::Object(map) => Some(map),
            Value::Null => None,
            _ => {
                issues.push(FieldIssue {
                    path: String::new(),
                    reason: "theme configuration must be an object".to_string(),
                });
                None
            }
        };

        let d = ThemeConfig::default();

        let mut r = SectionReader::new(root, SECTION_COLORS, &mut issues);
        let colors = ThemeColors {
            primary: r.color("primary", d.colors.primary),
            secondary: r.color("secondary", d.colors.secondary),
            background: r.color("background", d.colors.background),
            card_background: r.color("cardBackground", d.colors.card_background),
            text_primary: r.color("textPrimary", d.colors.text_primary),
            text_secondary: r.color("textSecondary", d.colors.text_secondary),
        };

        let mut r = SectionReader::new(root, SECTION_TYPOGRAPHY, &mut issues);
        let typography = ThemeTypography {
            font_heading: r.checked_text(
                "fontHeading",
                d.typography.font_heading,
                is_font_family,
                "a font family name",
            ),
            font_body: r.checked_text(
                "fontBody",
                d.typography.font_body,
                is_font_family,
                "a font family name",
            ),
            border_radius: r.checked_text(
                "borderRadius",
                d.typography.border_radius,
                is_css_length,
                "a CSS length",
            ),
            button_style: r.value("buttonStyle", d.typography.button_style),
        };

        let mut r = SectionReader::new(root, SECTION_HEADER, &mut issues);
        let header = ThemeHeader {
            style: r.value("style", d.header.style),
            background_color: r.color("backgroundColor", d.header.background_color),
            text_color: r.color("textColor", d.header.text_color),
            show_search: r.value("showSearch", d.header.show_search),
            show_promo: r.value("showPromo", d.header.show_promo),
            menu_position: r.value("menuPosition", d.header.menu_position),
            height: r.value("height", d.header.height),
            shadow: r.value("shadow", d.header.shadow),
        };

        let mut r = SectionReader::new(root, SECTION_BANNER, &mut issues);
        let mut images: Vec<String> = r.value("images", d.banner.images.clone());
        if images.len() > MAX_BANNER_IMAGES {
            r.reject(
                "images",
                format!("at most {MAX_BANNER_IMAGES} images are allowed"),
            );
            images = d.banner.images;
        }
        let banner = ThemeBanner {
            is_active: r.value("isActive", d.banner.is_active),
            banner_type: r.value("type", d.banner.banner_type),
            images,
            title: r.optional_text("title"),
            subtitle: r.optional_text("subtitle"),
            text_color: r.color("textColor", d.banner.text_color),
            text_position: r.value("textPosition", d.banner.text_position),
            overlay_opacity: r.opacity("overlayOpacity", d.banner.overlay_opacity),
            cta_text: r.optional_text("ctaText"),
            height: r.value("height", d.banner.height),
            autoplay: r.value("autoplay", d.banner.autoplay),
        };

        MergedTheme {
            config: ThemeConfig {
                colors,
                typography,
                header,
                banner,
            },
            issues,
        }
    }

    /// Merge over the defaults, discarding any issues.
    pub fn from_partial(input: &Value) -> ThemeConfig {
        Self::merge(input).config
    }

    /// Serialize to the wire representation.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Produce a new document with a single field replaced.
    ///
    /// `path` is `section.field` using wire names (`colors.cardBackground`).
    /// `self` is left untouched; an unknown path or an invalid value is a
    /// validation error.
    pub fn with_field(&self, path: &str, value: Value) -> Result<ThemeConfig, CoreError> {
        self.merge_field(path, value)?.into_strict()
    }

    /// Like [`ThemeConfig::with_field`], but returns the merge result so the
    /// caller sees which fields were rejected. Only path errors fail here.
    pub fn merge_field(&self, path: &str, value: Value) -> Result<MergedTheme, CoreError> {
        let (section, field) = path.split_once('.').ok_or_else(|| {
            CoreError::Validation(format!("Field path '{path}' must be 'section.field'"))
        })?;

        let known = section_fields(section)
            .ok_or_else(|| CoreError::Validation(format!("Unknown theme section '{section}'")))?;
        if !known.contains(&field) {
            return Err(CoreError::Validation(format!(
                "Unknown field '{field}' in theme section '{section}'"
            )));
        }

        let mut doc = self.to_value();
        if let Some(Value::Object(section_map)) = doc.get_mut(section) {
            section_map.insert(field.to_string(), value);
        }

        Ok(ThemeConfig::merge(&doc))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn empty_document_yields_defaults() {
        let merged = ThemeConfig::merge(&json!({}));
        assert_eq!(merged.config, ThemeConfig::default());
        assert!(merged.issues.is_empty());
    }

    #[test]
    fn null_document_yields_defaults() {
        assert_eq!(ThemeConfig::from_partial(&Value::Null), ThemeConfig::default());
    }

    #[test]
    fn only_primary_set_keeps_everything_else_default() {
        let merged = ThemeConfig::merge(&json!({"colors": {"primary": "#FF0000"}}));
        assert!(merged.issues.is_empty());

        let mut expected = ThemeConfig::default();
        expected.colors.primary = "#ff0000".to_string();
        assert_eq!(merged.config, expected);
    }

    #[test]
    fn present_fields_survive_when_siblings_are_invalid() {
        let merged = ThemeConfig::merge(&json!({
            "colors": {"primary": "#123456", "secondary": "blue"},
            "header": {"style": "centered", "height": "huge"}
        }));

        assert_eq!(merged.config.colors.primary, "#123456");
        assert_eq!(merged.config.colors.secondary, ThemeColors::default().secondary);
        assert_eq!(merged.config.header.style, HeaderStyle::Centered);
        assert_eq!(merged.config.header.height, HeaderHeight::Normal);

        let paths: Vec<_> = merged.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["colors.secondary", "header.height"]);
    }

    #[test]
    fn non_object_section_is_reported_and_defaulted() {
        let merged = ThemeConfig::merge(&json!({"banner": 5}));
        assert_eq!(merged.config.banner, ThemeBanner::default());
        assert_eq!(merged.issues[0].path, "banner");
    }

    #[test]
    fn overlay_opacity_range_is_enforced() {
        let ok = ThemeConfig::merge(&json!({"banner": {"overlayOpacity": 75}}));
        assert_eq!(ok.config.banner.overlay_opacity, 75);

        let bad = ThemeConfig::merge(&json!({"banner": {"overlayOpacity": 140}}));
        assert_eq!(bad.config.banner.overlay_opacity, 40);
        assert_eq!(bad.issues.len(), 1);
    }

    #[test]
    fn blank_optional_text_becomes_absent() {
        let merged = ThemeConfig::merge(&json!({"banner": {"title": "  ", "ctaText": "Shop"}}));
        assert_eq!(merged.config.banner.title, None);
        assert_eq!(merged.config.banner.cta_text.as_deref(), Some("Shop"));
    }

    #[test]
    fn serialized_field_set_matches_wire_schema() {
        let value = ThemeConfig::default().to_value();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);

        for (section, fields) in [
            (SECTION_COLORS, COLOR_FIELDS),
            (SECTION_TYPOGRAPHY, TYPOGRAPHY_FIELDS),
            (SECTION_HEADER, HEADER_FIELDS),
        ] {
            let mut keys: Vec<_> = obj[section].as_object().unwrap().keys().cloned().collect();
            let mut expected: Vec<_> = fields.iter().map(|f| f.to_string()).collect();
            keys.sort();
            expected.sort();
            assert_eq!(keys, expected, "section {section}");
        }

        let banner = obj["banner"].as_object().unwrap();
        assert_eq!(banner["type"], "image");
        assert_eq!(banner["overlayOpacity"], 40);
        assert!(!banner.contains_key("title"));
    }

    #[test]
    fn merge_of_serialized_document_is_identity() {
        let mut config = ThemeConfig::default();
        config.banner.title = Some("Summer sale".to_string());
        config.banner.images = vec!["https://cdn.example/a.jpg".to_string()];
        config.typography.button_style = ButtonStyle::Ghost;

        let merged = ThemeConfig::merge(&config.to_value());
        assert!(merged.issues.is_empty());
        assert_eq!(merged.config, config);
    }

    #[test]
    fn with_field_returns_new_document_and_leaves_original() {
        let original = ThemeConfig::default();
        let updated = original
            .with_field("typography.buttonStyle", json!("outlined"))
            .unwrap();

        assert_eq!(updated.typography.button_style, ButtonStyle::Outlined);
        assert_eq!(original.typography.button_style, ButtonStyle::Filled);
    }

    #[test]
    fn with_field_rejects_unknown_paths_and_bad_values() {
        let config = ThemeConfig::default();
        assert_matches!(
            config.with_field("colors.accent", json!("#fff")),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            config.with_field("footer.style", json!("simple")),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            config.with_field("colors.primary", json!("red")),
            Err(CoreError::Validation(msg)) if msg.contains("colors.primary")
        );
    }

    #[test]
    fn merge_field_reports_the_rejected_field() {
        let merged = ThemeConfig::default()
            .merge_field("banner.overlayOpacity", json!(250))
            .unwrap();
        let paths: Vec<_> = merged.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["banner.overlayOpacity"]);
        assert_eq!(merged.config.banner.overlay_opacity, 40);
    }

    #[test]
    fn with_field_can_set_optional_banner_text() {
        let updated = ThemeConfig::default()
            .with_field("banner.subtitle", json!("New arrivals"))
            .unwrap();
        assert_eq!(updated.banner.subtitle.as_deref(), Some("New arrivals"));
    }

    #[test]
    fn css_breaking_typography_is_rejected() {
        let merged = ThemeConfig::merge(&json!({
            "typography": {
                "fontHeading": "Lora\"); } body { display: none } /*",
                "fontBody": "Open Sans",
                "borderRadius": "0; } body { background: url(https://evil.example/x) } :root {"
            }
        }));

        assert_eq!(merged.config.typography.font_heading, DEFAULT_FONT);
        assert_eq!(merged.config.typography.font_body, "Open Sans");
        assert_eq!(merged.config.typography.border_radius, "0.5rem");

        let paths: Vec<_> = merged.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["typography.fontHeading", "typography.borderRadius"]);
        assert_matches!(
            merged.into_strict(),
            Err(CoreError::Validation(msg)) if msg.contains("typography.borderRadius")
        );
    }

    #[test]
    fn with_field_rejects_unsafe_font_family() {
        assert_matches!(
            ThemeConfig::default().with_field("typography.fontBody", json!("Inter'; x")),
            Err(CoreError::Validation(msg)) if msg.contains("typography.fontBody")
        );
    }

    #[test]
    fn typography_token_forms() {
        assert!(is_font_family("Playfair Display"));
        assert!(is_font_family("Source-Sans 3"));
        assert!(!is_font_family("Lora\")"));
        assert!(!is_font_family(&"a".repeat(65)));
        assert!(is_css_length("0.5rem"));
        assert!(is_css_length("8px"));
        assert!(is_css_length("50%"));
        assert!(!is_css_length("0"));
        assert!(!is_css_length("1rem;"));
    }

    #[test]
    fn hex_color_forms() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#A1B2C3"));
        assert!(!is_hex_color("fff"));
        assert!(!is_hex_color("#ffff"));
        assert!(!is_hex_color("#gggggg"));
    }
}
