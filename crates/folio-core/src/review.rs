//! AI review gateway contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::error::Result;

/// Request body sent to the review backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub feedback_text: String,
}

impl ReviewRequest {
    pub fn new(feedback_text: impl Into<String>) -> Self {
        Self {
            feedback_text: feedback_text.into(),
        }
    }
}

/// Turns free-form feedback text into a structured [`AnalysisResult`].
///
/// A failed call is terminal for that request: implementations do not retry,
/// and callers surface the error to the user.
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    async fn review(&self, request: ReviewRequest) -> Result<AnalysisResult>;
}
