//! Persistence adapter over a [`StorageScope`].
//!
//! Layout under the fixed keys:
//!
//! ```text
//! folio.currentUser      -> "alice"
//! folio.userFeedback     -> { "alice": [FeedbackItem, ...] }   (newest first)
//! folio.analysisResults  -> { "<feedback id>": AnalysisResult }
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use folio_core::analysis::{AnalysisMap, AnalysisResult};
use folio_core::error::Result;
use folio_core::feedback::{FeedbackBook, FeedbackDraft, FeedbackItem, FeedbackRepository};
use folio_core::storage::{
    ANALYSIS_RESULTS_KEY, CURRENT_USER_KEY, StorageScope, USER_FEEDBACK_KEY,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// [`FeedbackRepository`] that keeps everything in an injected storage scope.
#[derive(Clone)]
pub struct LocalFeedbackRepository {
    scope: Arc<dyn StorageScope>,
}

impl LocalFeedbackRepository {
    pub fn new(scope: Arc<dyn StorageScope>) -> Self {
        Self { scope }
    }

    /// Reads `key` as JSON, falling back to `T::default()` when the key is
    /// absent, the scope cannot be read, or the value does not parse.
    fn read_or_default<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.scope.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!("[LocalFeedbackRepository] Failed to read '{}': {}", key, e);
                return T::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(
                "[LocalFeedbackRepository] Ignoring malformed value under '{}': {}",
                key,
                e
            );
            T::default()
        })
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.scope.set_item(key, &json)
    }

    /// Millisecond timestamp id, bumped past any id in `taken`.
    fn next_id(taken: &HashSet<String>, now_ms: i64) -> (String, i64) {
        let mut candidate = now_ms;
        while taken.contains(&candidate.to_string()) {
            candidate += 1;
        }
        (candidate.to_string(), candidate)
    }

    /// Ids are unique across every user and every analysis key in the scope,
    /// since the analysis map is shared.
    fn taken_ids(&self, book: &FeedbackBook) -> HashSet<String> {
        let analyses: AnalysisMap = self.read_or_default(ANALYSIS_RESULTS_KEY);
        book.values()
            .flatten()
            .map(|item| item.id.clone())
            .chain(analyses.into_keys())
            .collect()
    }

    fn add_feedback_at(
        &self,
        username: &str,
        draft: FeedbackDraft,
        now_ms: i64,
    ) -> Result<FeedbackItem> {
        let mut book: FeedbackBook = self.read_or_default(USER_FEEDBACK_KEY);
        let (id, timestamp) = Self::next_id(&self.taken_ids(&book), now_ms);
        let item = draft.into_item(id, username, timestamp)?;
        book.entry(username.to_string())
            .or_default()
            .insert(0, item.clone());

        self.write_json(USER_FEEDBACK_KEY, &book)?;
        tracing::debug!(
            "[LocalFeedbackRepository] Added feedback {} for '{}'",
            item.id,
            username
        );
        Ok(item)
    }
}

impl FeedbackRepository for LocalFeedbackRepository {
    fn get_current_user(&self) -> Option<String> {
        match self.scope.get_item(CURRENT_USER_KEY) {
            Ok(Some(user)) if !user.trim().is_empty() => Some(user),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("[LocalFeedbackRepository] Failed to read session: {}", e);
                None
            }
        }
    }

    fn login_user(&self, username: &str) -> Result<()> {
        self.scope.set_item(CURRENT_USER_KEY, username)?;
        tracing::debug!("[LocalFeedbackRepository] Session set to '{}'", username);
        Ok(())
    }

    fn logout_user(&self) -> Result<()> {
        self.scope.remove_item(CURRENT_USER_KEY)
    }

    fn get_feedback_for_user(&self, username: &str) -> Vec<FeedbackItem> {
        let mut book: FeedbackBook = self.read_or_default(USER_FEEDBACK_KEY);
        book.remove(username).unwrap_or_default()
    }

    fn add_feedback_for_user(&self, username: &str, draft: FeedbackDraft) -> Result<FeedbackItem> {
        self.add_feedback_at(username, draft, chrono::Utc::now().timestamp_millis())
    }

    fn delete_feedback_for_user(&self, username: &str, id: &str) -> Result<Vec<FeedbackItem>> {
        let mut book: FeedbackBook = self.read_or_default(USER_FEEDBACK_KEY);
        let Some(list) = book.get_mut(username) else {
            return Ok(Vec::new());
        };

        let before = list.len();
        list.retain(|item| item.id != id);
        if list.len() == before {
            return Ok(list.clone());
        }

        let updated = list.clone();
        self.write_json(USER_FEEDBACK_KEY, &book)?;
        Ok(updated)
    }

    fn get_analysis_results(&self) -> AnalysisMap {
        self.read_or_default(ANALYSIS_RESULTS_KEY)
    }

    fn save_analysis_result(&self, id: &str, analysis: AnalysisResult) -> Result<AnalysisMap> {
        let mut results = self.get_analysis_results();
        results.insert(id.to_string(), analysis);
        self.write_json(ANALYSIS_RESULTS_KEY, &results)?;
        Ok(results)
    }

    fn delete_analysis_result(&self, id: &str) -> Result<AnalysisMap> {
        let mut results = self.get_analysis_results();
        if results.remove(id).is_some() {
            self.write_json(ANALYSIS_RESULTS_KEY, &results)?;
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorageScope;
    use folio_core::analysis::Sentiment;

    fn repository() -> (Arc<MemoryStorageScope>, LocalFeedbackRepository) {
        let scope = Arc::new(MemoryStorageScope::new());
        let repo = LocalFeedbackRepository::new(scope.clone());
        (scope, repo)
    }

    #[test]
    fn test_session_round_trip() {
        let (_, repo) = repository();
        assert_eq!(repo.get_current_user(), None);

        repo.login_user("alice").unwrap();
        assert_eq!(repo.get_current_user().as_deref(), Some("alice"));

        repo.login_user("bob").unwrap();
        assert_eq!(repo.get_current_user().as_deref(), Some("bob"));

        repo.logout_user().unwrap();
        assert_eq!(repo.get_current_user(), None);
    }

    #[test]
    fn test_blank_session_value_is_no_session() {
        let (scope, repo) = repository();
        scope.set_item(CURRENT_USER_KEY, "  ").unwrap();
        assert_eq!(repo.get_current_user(), None);
    }

    #[test]
    fn test_add_prepends_and_ids_are_unique() {
        let (_, repo) = repository();
        let first = repo
            .add_feedback_for_user("alice", FeedbackDraft::new("One", "first note"))
            .unwrap();
        let second = repo
            .add_feedback_for_user("alice", FeedbackDraft::new("Two", "second note"))
            .unwrap();

        assert_ne!(first.id, second.id);
        let list = repo.get_feedback_for_user("alice");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], second);
        assert_eq!(list[1], first);
        assert!(repo.get_feedback_for_user("bob").is_empty());
    }

    #[test]
    fn test_next_id_skips_taken_timestamps() {
        let taken = HashSet::from(["1000".to_string(), "1001".to_string()]);
        let (id, timestamp) = LocalFeedbackRepository::next_id(&taken, 1000);
        assert_eq!(id, "1002");
        assert_eq!(timestamp, 1002);
    }

    #[test]
    fn test_same_millisecond_ids_differ_across_users() {
        let (_, repo) = repository();
        let alice = repo
            .add_feedback_at("alice", FeedbackDraft::new("", "from alice"), 5000)
            .unwrap();
        let bob = repo
            .add_feedback_at("bob", FeedbackDraft::new("", "from bob"), 5000)
            .unwrap();
        assert_eq!(alice.id, "5000");
        assert_eq!(bob.id, "5001");

        // Deleting bob's item and its analysis leaves alice's analysis alone.
        let analysis = AnalysisResult::new(Sentiment::Positive, "Kind words.", "Thank them.");
        repo.save_analysis_result(&alice.id, analysis.clone()).unwrap();
        repo.delete_feedback_for_user("bob", &bob.id).unwrap();
        repo.delete_analysis_result(&bob.id).unwrap();
        assert_eq!(repo.get_analysis(&alice.id), Some(analysis));
    }

    #[test]
    fn test_ids_skip_orphaned_analysis_keys() {
        let (_, repo) = repository();
        repo.save_analysis_result(
            "7000",
            AnalysisResult::new(Sentiment::Neutral, "Old.", "None."),
        )
        .unwrap();
        let item = repo
            .add_feedback_at("alice", FeedbackDraft::new("", "fresh"), 7000)
            .unwrap();
        assert_eq!(item.id, "7001");
        assert_eq!(item.timestamp, 7001);
    }

    #[test]
    fn test_add_rejects_blank_content_without_writing() {
        let (scope, repo) = repository();
        let err = repo
            .add_feedback_for_user("alice", FeedbackDraft::new("Bug", "   "))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(scope.get_item(USER_FEEDBACK_KEY).unwrap().is_none());
    }

    #[test]
    fn test_persisted_item_reads_back_equal() {
        let (scope, repo) = repository();
        let item = repo
            .add_feedback_for_user("alice", FeedbackDraft::new(" Bug ", " broken "))
            .unwrap();
        assert_eq!(item.title, "Bug");
        assert_eq!(item.content, "broken");

        let reopened = LocalFeedbackRepository::new(scope);
        assert_eq!(reopened.get_feedback_for_user("alice"), vec![item]);
    }

    #[test]
    fn test_delete_feedback() {
        let (_, repo) = repository();
        let keep = repo
            .add_feedback_for_user("alice", FeedbackDraft::new("", "keep me"))
            .unwrap();
        let removed = repo
            .add_feedback_for_user("alice", FeedbackDraft::new("", "drop me"))
            .unwrap();

        let updated = repo.delete_feedback_for_user("alice", &removed.id).unwrap();
        assert_eq!(updated, vec![keep.clone()]);

        let unchanged = repo.delete_feedback_for_user("alice", "missing").unwrap();
        assert_eq!(unchanged, vec![keep]);

        assert!(repo.delete_feedback_for_user("nobody", "x").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_reads_as_empty() {
        let (scope, repo) = repository();
        scope.set_item(USER_FEEDBACK_KEY, "[1, 2").unwrap();
        scope.set_item(ANALYSIS_RESULTS_KEY, "\"not a map\"").unwrap();

        assert!(repo.get_feedback_for_user("alice").is_empty());
        assert!(repo.get_analysis_results().is_empty());

        // The next write replaces the corrupt value.
        repo.add_feedback_for_user("alice", FeedbackDraft::new("", "recovered"))
            .unwrap();
        assert_eq!(repo.get_feedback_for_user("alice").len(), 1);
    }

    #[test]
    fn test_analysis_overwrite_and_delete() {
        let (_, repo) = repository();
        let a = AnalysisResult::new(Sentiment::Positive, "Nice.", "Keep going.");
        let b = AnalysisResult::new(Sentiment::Negative, "Broken.", "Fix it.");

        repo.save_analysis_result("1", a).unwrap();
        let map = repo.save_analysis_result("1", b.clone()).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(repo.get_analysis("1"), Some(b));

        let map = repo.delete_analysis_result("1").unwrap();
        assert!(map.is_empty());
        assert!(repo.delete_analysis_result("1").unwrap().is_empty());
    }

    #[test]
    fn test_write_failure_propagates() {
        let scope = Arc::new(MemoryStorageScope::new().with_quota(16));
        let repo = LocalFeedbackRepository::new(scope);

        let err = repo
            .add_feedback_for_user("alice", FeedbackDraft::new("", "a note that cannot fit"))
            .unwrap_err();
        assert!(err.is_storage_write());
        assert!(repo.get_feedback_for_user("alice").is_empty());
    }
}
