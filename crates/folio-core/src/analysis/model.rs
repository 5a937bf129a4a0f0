use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Analysis results keyed by `FeedbackItem::id`. At most one per item.
pub type AnalysisMap = BTreeMap<String, AnalysisResult>;

/// Overall tone of a feedback item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Sentiment, summary and suggested action produced by the review gateway.
///
/// Opaque to the store: it is stored and overwritten whole, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// One-sentence summary of the feedback.
    pub summary: String,
    /// One-sentence recommendation for the site owner.
    pub suggested_action: String,
}

impl AnalysisResult {
    pub fn new(
        sentiment: Sentiment,
        summary: impl Into<String>,
        suggested_action: impl Into<String>,
    ) -> Self {
        Self {
            sentiment,
            summary: summary.into(),
            suggested_action: suggested_action.into(),
        }
    }
}
