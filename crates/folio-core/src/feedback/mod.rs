//! Feedback domain module.
//!
//! # Module Structure
//!
//! - `model`: `FeedbackItem` and the draft normalization applied before persisting
//! - `repository`: the persistence contract the store is built on

mod model;
mod repository;

pub use model::{DEFAULT_FEEDBACK_TITLE, FeedbackBook, FeedbackDraft, FeedbackItem};
pub use repository::FeedbackRepository;
