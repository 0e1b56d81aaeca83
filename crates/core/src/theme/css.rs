//! Presentational values derived from a theme document.
//!
//! The catalog's design-token system consumes colors as bare
//! `H S% L%` triples (no `hsl()` wrapper) so components can compose
//! alpha variants. Font families other than [`DEFAULT_FONT`] need a
//! stylesheet injected once; the per-font id makes injection idempotent.

use std::collections::BTreeMap;

use serde::Serialize;

use super::document::{is_css_length, is_font_family, ThemeConfig, ThemeTypography, DEFAULT_FONT};

/// Base URL for on-demand font stylesheets.
pub const FONT_STYLESHEET_BASE: &str = "https://fonts.googleapis.com/css2";

/// Font weights requested for every injected family.
const FONT_WEIGHTS: &str = "400;500;600;700";

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Hue in degrees, saturation and lightness in percent, all rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    /// Design-token form: `222 47% 11%`.
    pub fn to_token(self) -> String {
        format!("{} {}% {}%", self.h, self.s, self.l)
    }
}

/// Parse `#rgb` or `#rrggbb` into its channels.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Convert a hex color to rounded HSL. Returns `None` for malformed input.
pub fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    let (r, g, b) = parse_hex(hex)?;
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s)
    };

    Some(Hsl {
        h: ((h * 360.0).round() as u16) % 360,
        s: (s * 100.0).round() as u8,
        l: (l * 100.0).round() as u8,
    })
}

// ---------------------------------------------------------------------------
// Fonts
// ---------------------------------------------------------------------------

/// A stylesheet to inject for a font family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontStylesheet {
    /// Deterministic element id, e.g. `font-playfair-display`.
    pub id: String,
    pub family: String,
    pub href: String,
}

/// Deterministic id for a font family: lowercase, non-alphanumerics
/// collapsed to single dashes.
pub fn font_id(family: &str) -> String {
    let mut slug = String::with_capacity(family.len());
    for c in family.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    format!("font-{slug}")
}

/// Query-string form of a family: spaces become `+`, anything outside
/// `[A-Za-z0-9-]` is percent-encoded.
fn encode_family(family: &str) -> String {
    let mut encoded = String::with_capacity(family.len());
    for (i, word) in family.split_whitespace().enumerate() {
        if i > 0 {
            encoded.push('+');
        }
        for b in word.bytes() {
            if b.is_ascii_alphanumeric() || b == b'-' {
                encoded.push(char::from(b));
            } else {
                encoded.push_str(&format!("%{b:02X}"));
            }
        }
    }
    encoded
}

/// The stylesheet for `family`, or `None` for the bundled default font and
/// for anything that is not a plain family name.
pub fn font_stylesheet(family: &str) -> Option<FontStylesheet> {
    let family = family.trim();
    if !is_font_family(family) || family.eq_ignore_ascii_case(DEFAULT_FONT) {
        return None;
    }
    let query_family = encode_family(family);
    Some(FontStylesheet {
        id: font_id(family),
        family: family.to_string(),
        href: format!(
            "{FONT_STYLESHEET_BASE}?family={query_family}:wght@{FONT_WEIGHTS}&display=swap"
        ),
    })
}

/// Stylesheets needed by a document, de-duplicated by id.
pub fn required_fonts(config: &ThemeConfig) -> Vec<FontStylesheet> {
    let mut fonts: Vec<FontStylesheet> = Vec::new();
    for family in [&config.typography.font_heading, &config.typography.font_body] {
        if let Some(sheet) = font_stylesheet(family) {
            if !fonts.iter().any(|f| f.id == sheet.id) {
                fonts.push(sheet);
            }
        }
    }
    fonts
}

// ---------------------------------------------------------------------------
// CSS custom properties
// ---------------------------------------------------------------------------

/// CSS custom properties derived from a document, keyed without the
/// leading `--`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ThemeTokens {
    pub variables: BTreeMap<String, String>,
}

impl ThemeTokens {
    /// Derive every custom property the catalog stylesheet reads.
    pub fn derive(config: &ThemeConfig) -> Self {
        let mut variables = BTreeMap::new();
        let mut color = |name: &str, hex: &str| {
            if let Some(hsl) = hex_to_hsl(hex) {
                variables.insert(name.to_string(), hsl.to_token());
            }
        };

        let c = &config.colors;
        color("primary", &c.primary);
        color("secondary", &c.secondary);
        color("background", &c.background);
        color("card", &c.card_background);
        color("foreground", &c.text_primary);
        color("muted-foreground", &c.text_secondary);
        color("header-background", &config.header.background_color);
        color("header-foreground", &config.header.text_color);
        color("banner-foreground", &config.banner.text_color);

        let t = &config.typography;
        let radius = if is_css_length(&t.border_radius) {
            t.border_radius.clone()
        } else {
            ThemeTypography::default().border_radius
        };
        variables.insert("radius".to_string(), radius);
        variables.insert("font-heading".to_string(), font_stack(&t.font_heading));
        variables.insert("font-body".to_string(), font_stack(&t.font_body));
        variables.insert(
            "banner-overlay-opacity".to_string(),
            format!("{}", f64::from(config.banner.overlay_opacity) / 100.0),
        );

        Self { variables }
    }

    /// Render as a `:root { ... }` stylesheet.
    pub fn to_stylesheet(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.variables {
            css.push_str(&format!("  --{name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }
}

/// `"Family", sans-serif`; an unsafe family renders as the default font.
fn font_stack(family: &str) -> String {
    let family = family.trim();
    let family = if is_font_family(family) { family } else { DEFAULT_FONT };
    format!("\"{family}\", sans-serif")
}

/// Full stylesheet for a catalog page: font imports followed by the
/// custom properties.
pub fn render_stylesheet(config: &ThemeConfig) -> String {
    let mut css = String::new();
    for font in required_fonts(config) {
        css.push_str(&format!("@import url(\"{}\");\n", font.href));
    }
    css.push_str(&ThemeTokens::derive(config).to_stylesheet());
    css
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
