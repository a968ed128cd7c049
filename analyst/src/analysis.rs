//! Domain types for a completed market analysis.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Trading verdict issued by the model.
///
/// Parsed case-sensitively from the exact upper-case tokens.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Verdict {
    Buy,
    Sell,
    Hold,
    Wait,
}

/// Risk classification of the proposed setup.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
}

/// One point of the projected price path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub price: f64,
    /// Optional short note the model may attach to a point (e.g. "halving").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// A web page the model service reports having consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// The validated analysis handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// The coin the analysis is about.
    #[serde(rename = "coin")]
    pub subject: String,
    /// Free text, e.g. "$65,000"; not guaranteed to parse as a number.
    #[serde(rename = "currentPrice")]
    pub current_price_label: String,
    pub verdict: Verdict,
    /// Always within `0.0..=100.0`.
    pub confidence_score: f64,
    pub risk_level: RiskLevel,
    pub summary: String,
    /// Markdown prose.
    pub detailed_analysis: String,
    pub key_factors: Vec<String>,
    pub entry_price: String,
    pub take_profit: String,
    pub stop_loss: String,
    /// Chronological.
    pub predicted_trend: Vec<TrendPoint>,
    pub sources: Vec<Source>,
}

impl AnalysisResult {
    /// Percentage change of the last trend point relative to the first one.
    ///
    /// `None` when the trend has fewer than two points or starts at zero.
    pub fn projected_change_pct(&self) -> Option<f64> {
        let first = self.predicted_trend.first()?;
        let last = self.predicted_trend.last()?;
        if self.predicted_trend.len() < 2 || first.price == 0.0 {
            return None;
        }
        Some((last.price - first.price) / first.price * 100.0)
    }
}
