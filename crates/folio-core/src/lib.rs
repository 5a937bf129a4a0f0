//! Domain layer for Folio: feedback items, analysis results, the session
//! claim, and the traits the outer layers implement.

pub mod analysis;
pub mod config;
pub mod error;
pub mod feedback;
pub mod notifier;
pub mod review;
pub mod secret;
pub mod session;
pub mod storage;

pub use analysis::{AnalysisMap, AnalysisResult, Sentiment};
pub use error::{FolioError, Result};
pub use feedback::{FeedbackDraft, FeedbackItem, FeedbackRepository};
pub use notifier::{Notifier, RecordingNotifier};
pub use review::{ReviewGateway, ReviewRequest};
pub use session::{LoginKind, Session};
pub use storage::StorageScope;
