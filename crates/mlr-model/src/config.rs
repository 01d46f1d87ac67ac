//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Default MLR percentage above which a group is flagged.
pub const DEFAULT_RISK_THRESHOLD: f64 = 75.0;
/// Default commission as a fraction of debit revenue.
pub const DEFAULT_COMMISSION_RATE: f64 = 0.10;
/// Default administrative loading applied to pre-authorized cost.
pub const DEFAULT_PA_LOADING_FACTOR: f64 = 1.4;
/// Group name of the retail product line (compared case-insensitively).
pub const DEFAULT_RETAIL_PRODUCT_LINE: &str = "family scheme";
/// Debit note descriptions containing this marker are pass-through, not premium.
pub const DEFAULT_PASS_THROUGH_MARKER: &str = "tpa";

/// Tunable constants of the MLR computation.
///
/// Every field has a default matching the production dashboard, so a partial
/// JSON document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub risk_threshold: f64,
    pub commission_rate: f64,
    pub pa_loading_factor: f64,
    pub retail_product_line: String,
    pub pass_through_marker: String,
    /// Decimal places for commission, loaded cost and ratio columns.
    pub ratio_decimals: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_threshold: DEFAULT_RISK_THRESHOLD,
            commission_rate: DEFAULT_COMMISSION_RATE,
            pa_loading_factor: DEFAULT_PA_LOADING_FACTOR,
            retail_product_line: DEFAULT_RETAIL_PRODUCT_LINE.to_string(),
            pass_through_marker: DEFAULT_PASS_THROUGH_MARKER.to_string(),
            ratio_decimals: 2,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_risk_threshold(mut self, threshold: f64) -> Self {
        self.risk_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_commission_rate(mut self, rate: f64) -> Self {
        self.commission_rate = rate;
        self
    }

    #[must_use]
    pub fn with_pa_loading_factor(mut self, factor: f64) -> Self {
        self.pa_loading_factor = factor;
        self
    }

    #[must_use]
    pub fn with_retail_product_line(mut self, name: impl Into<String>) -> Self {
        self.retail_product_line = name.into();
        self
    }

    #[must_use]
    pub fn with_pass_through_marker(mut self, marker: impl Into<String>) -> Self {
        self.pass_through_marker = marker.into();
        self
    }

    /// Product line name lowered for case-insensitive comparison.
    pub fn product_line_key(&self) -> String {
        self.retail_product_line.trim().to_lowercase()
    }

    /// Pass-through marker lowered for case-insensitive matching.
    pub fn pass_through_key(&self) -> String {
        self.pass_through_marker.to_lowercase()
    }
}
