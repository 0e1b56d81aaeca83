//! Stock decrement policy applied by the order transaction.
//!
//! Orders never check stock before decrementing; the policy only decides what
//! happens when a decrement would take the quantity below zero.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How a product's stock quantity behaves when an order exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Stock may go negative; the shortfall stays visible to attendants.
    #[default]
    AllowNegative,
    /// Stock stops at zero; the shortfall is discarded.
    ClampAtZero,
}

impl StockPolicy {
    /// Whether the decrement is floored at zero.
    pub fn clamps_at_zero(self) -> bool {
        matches!(self, StockPolicy::ClampAtZero)
    }

    /// Stock remaining after ordering `quantity` units from `current`.
    ///
    /// The order transaction applies the same floor in its `UPDATE`.
    pub fn apply(self, current: i32, quantity: i32) -> i32 {
        let remaining = current.saturating_sub(quantity);
        match self {
            StockPolicy::AllowNegative => remaining,
            StockPolicy::ClampAtZero => remaining.max(0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StockPolicy::AllowNegative => "allow_negative",
            StockPolicy::ClampAtZero => "clamp_at_zero",
        }
    }
}

impl fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "allow_negative" => Ok(StockPolicy::AllowNegative),
            "clamp_at_zero" | "clamp" => Ok(StockPolicy::ClampAtZero),
            other => Err(CoreError::Validation(format!(
                "Unknown stock policy '{other}'. Expected allow_negative or clamp_at_zero"
            ))),
        }
    }
}
