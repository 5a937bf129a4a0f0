//! Key/value storage scope.
//!
//! Modelled on browser local storage: string keys, string values, synchronous
//! calls. The persistence adapter is the only code that should call this.

use crate::error::Result;

/// Key holding the raw username of the current session.
pub const CURRENT_USER_KEY: &str = "folio.currentUser";

/// Key holding `{ [username]: FeedbackItem[] }` as JSON.
pub const USER_FEEDBACK_KEY: &str = "folio.userFeedback";

/// Key holding `{ [feedbackId]: AnalysisResult }` as JSON.
pub const ANALYSIS_RESULTS_KEY: &str = "folio.analysisResults";

/// A handle to a key/value store shared by every user of the same scope.
pub trait StorageScope: Send + Sync {
    /// Returns the stored value, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
