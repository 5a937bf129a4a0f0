//! AI-derived analysis of feedback items.

mod model;

pub use model::{AnalysisMap, AnalysisResult, Sentiment};
