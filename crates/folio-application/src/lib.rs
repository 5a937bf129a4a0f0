//! Application layer for Folio.
//!
//! Coordinates the domain and infrastructure layers: the feedback store that
//! front-ends drive, the single-flight review service, and bootstrap wiring.

pub mod bootstrap;
pub mod feedback_store;
pub mod notifier;
pub mod review_service;

pub use bootstrap::AppBootstrap;
pub use feedback_store::{FeedbackStore, FeedbackView};
pub use notifier::TracingNotifier;
pub use review_service::ReviewService;
