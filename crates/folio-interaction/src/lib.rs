//! Remote collaborators: the Gemini-backed review gateway.

pub mod gemini_review_gateway;
mod prompt;

pub use gemini_review_gateway::GeminiReviewGateway;
