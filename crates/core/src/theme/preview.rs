//! State held by a preview surface.
//!
//! A preview only ever replaces its document: each incoming payload is
//! merged over the defaults, not over the previous state. Because the editor
//! always sends the full document, the preview converges on whichever
//! message it applied last, regardless of how intermediate messages were
//! coalesced or reordered.

use std::collections::BTreeSet;

use serde_json::Value;

use super::css::{required_fonts, FontStylesheet, ThemeTokens};
use super::document::{FieldIssue, ThemeConfig};
use super::message::TokensPayload;

#[derive(Debug, Clone, Default)]
pub struct PreviewSurface {
    config: ThemeConfig,
    tokens: ThemeTokens,
    injected_fonts: BTreeSet<String>,
}

/// What a preview must do after applying a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewUpdate {
    pub tokens: ThemeTokens,
    /// Fonts not injected by any earlier update.
    pub new_fonts: Vec<FontStylesheet>,
    /// Fields in the payload that were replaced by defaults.
    pub issues: Vec<FieldIssue>,
}

impl PreviewUpdate {
    pub fn into_payload(self) -> TokensPayload {
        TokensPayload {
            css_variables: self.tokens,
            font_stylesheets: self.new_fonts,
        }
    }
}

impl PreviewSurface {
    /// A surface showing the default document with tokens derived.
    pub fn new() -> Self {
        let config = ThemeConfig::default();
        Self {
            tokens: ThemeTokens::derive(&config),
            config,
            injected_fonts: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn tokens(&self) -> &ThemeTokens {
        &self.tokens
    }

    pub fn injected_fonts(&self) -> impl Iterator<Item = &str> {
        self.injected_fonts.iter().map(String::as_str)
    }

    /// Merge a raw payload (full or partial) and re-derive.
    pub fn apply(&mut self, payload: &Value) -> PreviewUpdate {
        let merged = ThemeConfig::merge(payload);
        let mut update = self.apply_config(merged.config);
        update.issues = merged.issues;
        update
    }

    /// Replace the document with an already-merged one and re-derive.
    pub fn apply_config(&mut self, config: ThemeConfig) -> PreviewUpdate {
        self.tokens = ThemeTokens::derive(&config);

        let new_fonts: Vec<FontStylesheet> = required_fonts(&config)
            .into_iter()
            .filter(|f| self.injected_fonts.insert(f.id.clone()))
            .collect();

        self.config = config;

        PreviewUpdate {
            tokens: self.tokens.clone(),
            new_fonts,
            issues: Vec::new(),
        }
    }
}
