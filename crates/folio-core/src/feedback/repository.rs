//! Persistence contract for sessions, feedback lists and analysis results.

use crate::analysis::{AnalysisMap, AnalysisResult};
use crate::error::Result;
use crate::feedback::model::{FeedbackDraft, FeedbackItem};

/// The only path through which feedback state reaches storage.
///
/// Reads never fail: a missing or unparsable value is returned as its empty
/// default. Writes return the storage error to the caller untouched.
///
/// Every mutation is a read-modify-write of the whole top-level value under
/// its key; two writers sharing one storage scope race and the last one wins.
pub trait FeedbackRepository: Send + Sync {
    /// Returns the username of the current session, if any.
    fn get_current_user(&self) -> Option<String>;

    /// Overwrites the session with `username`. This is an identity claim;
    /// no credential is checked.
    fn login_user(&self, username: &str) -> Result<()>;

    fn logout_user(&self) -> Result<()>;

    /// Returns the user's feedback, newest first, or an empty list.
    fn get_feedback_for_user(&self, username: &str) -> Vec<FeedbackItem>;

    /// Creates an item from `draft`, prepends it to the user's list and persists.
    fn add_feedback_for_user(&self, username: &str, draft: FeedbackDraft) -> Result<FeedbackItem>;

    /// Removes the item with `id` and returns the updated list. An unknown id
    /// returns the list unchanged.
    fn delete_feedback_for_user(&self, username: &str, id: &str) -> Result<Vec<FeedbackItem>>;

    fn get_analysis_results(&self) -> AnalysisMap;

    fn get_analysis(&self, id: &str) -> Option<AnalysisResult> {
        self.get_analysis_results().remove(id)
    }

    /// Sets or overwrites the analysis for `id` and returns the full map.
    fn save_analysis_result(&self, id: &str, analysis: AnalysisResult) -> Result<AnalysisMap>;

    /// Removes the analysis for `id` if present and returns the full map.
    fn delete_analysis_result(&self, id: &str) -> Result<AnalysisMap>;
}
