//! Feedback Store
//!
//! In-memory projection of the session, the current user's feedback and the
//! analysis map, kept in step with a [`FeedbackRepository`]. Every operation
//! reports its outcome through the injected [`Notifier`] and never returns an
//! error to the caller.

use std::sync::Arc;

use folio_core::analysis::{AnalysisMap, AnalysisResult};
use folio_core::feedback::{FeedbackDraft, FeedbackItem, FeedbackRepository};
use folio_core::notifier::Notifier;
use folio_core::session::{LoginKind, Session};

/// State controller between front-end handlers and the persistence adapter.
pub struct FeedbackStore {
    repository: Arc<dyn FeedbackRepository>,
    notifier: Arc<dyn Notifier>,
    is_mounted: bool,
    current_user: Option<Session>,
    user_feedback: Vec<FeedbackItem>,
    analysis_results: AnalysisMap,
}

/// Read access to a mounted store.
#[derive(Clone, Copy)]
pub struct FeedbackView<'a> {
    store: &'a FeedbackStore,
}

impl<'a> FeedbackView<'a> {
    pub fn current_user(&self) -> Option<&'a str> {
        self.store.current_user.as_ref().map(Session::username)
    }

    /// The current user's feedback, newest first.
    pub fn user_feedback(&self) -> &'a [FeedbackItem] {
        &self.store.user_feedback
    }

    pub fn analysis_results(&self) -> &'a AnalysisMap {
        &self.store.analysis_results
    }

    pub fn analysis_for(&self, id: &str) -> Option<&'a AnalysisResult> {
        self.store.analysis_results.get(id)
    }
}

impl FeedbackStore {
    /// Creates an unmounted store. Call [`mount`](Self::mount) before reading.
    pub fn new(repository: Arc<dyn FeedbackRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
            is_mounted: false,
            current_user: None,
            user_feedback: Vec::new(),
            analysis_results: AnalysisMap::new(),
        }
    }

    /// Runs the one-time hydration read. Later calls do nothing.
    pub fn mount(&mut self) {
        if self.is_mounted {
            return;
        }

        self.current_user = self.repository.get_current_user().map(Session::new);
        if let Some(session) = &self.current_user {
            self.user_feedback = self.repository.get_feedback_for_user(session.username());
        }
        self.analysis_results = self.repository.get_analysis_results();
        self.is_mounted = true;

        tracing::debug!(
            "[FeedbackStore] Mounted: user={:?}, feedback={}, analyses={}",
            self.current_user.as_ref().map(Session::username),
            self.user_feedback.len(),
            self.analysis_results.len()
        );
    }

    pub fn is_mounted(&self) -> bool {
        self.is_mounted
    }

    /// Returns the state, or `None` while the hydration read has not run.
    pub fn view(&self) -> Option<FeedbackView<'_>> {
        self.is_mounted.then_some(FeedbackView { store: self })
    }

    /// Returns the content of one of the current user's items.
    pub fn feedback_content(&self, id: &str) -> Option<String> {
        self.user_feedback
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.content.clone())
    }

    /// Claims `username` as the current session. No credential is checked.
    ///
    /// The name is trimmed; a blank name is refused, since storage reads a
    /// blank session back as logged out.
    pub fn login(&mut self, username: &str, kind: LoginKind) {
        self.mount();

        let username = username.trim();
        if username.is_empty() {
            self.notifier.error("Username cannot be empty");
            return;
        }

        if let Err(e) = self.repository.login_user(username) {
            tracing::error!("[FeedbackStore] Failed to persist session: {}", e);
            self.notifier.error(&format!("Could not start a session: {e}"));
            return;
        }

        self.current_user = Some(Session::new(username));
        self.user_feedback = self.repository.get_feedback_for_user(username);
        self.notifier.success(&format!("{kind} as {username}"));
    }

    pub fn logout(&mut self) {
        self.mount();

        if let Err(e) = self.repository.logout_user() {
            tracing::error!("[FeedbackStore] Failed to clear session: {}", e);
            self.notifier.error(&format!("Could not log out: {e}"));
            return;
        }

        self.current_user = None;
        self.user_feedback.clear();
        self.notifier.success("Logged out");
    }

    /// Submits feedback for the current user. Returns `true` when the item was
    /// persisted and prepended to `user_feedback`.
    pub fn add_feedback(&mut self, title: &str, content: &str) -> bool {
        self.mount();

        let Some(username) = self.current_username() else {
            self.notifier.error("Please log in to submit feedback");
            return false;
        };

        let draft = FeedbackDraft::new(title, content);
        if let Err(e) = draft.normalize() {
            tracing::debug!("[FeedbackStore] Rejected feedback: {}", e);
            self.notifier.error("Feedback content cannot be empty");
            return false;
        }

        match self.repository.add_feedback_for_user(&username, draft) {
            Ok(item) => {
                tracing::info!("[FeedbackStore] Feedback {} submitted by {}", item.id, username);
                self.user_feedback.insert(0, item);
                self.notifier.success("Feedback submitted");
                true
            }
            Err(e) => {
                tracing::error!("[FeedbackStore] Failed to save feedback: {}", e);
                self.notifier.error(&format!("Failed to save feedback: {e}"));
                false
            }
        }
    }

    /// Deletes one of the current user's items together with its analysis.
    ///
    /// If the item write fails after the analysis was removed, the item stays
    /// listed without an analysis, matching storage.
    pub fn delete_feedback(&mut self, id: &str) {
        self.mount();

        let Some(username) = self.current_username() else {
            return;
        };
        if id.is_empty() {
            return;
        }

        if !self.user_feedback.iter().any(|item| item.id == id) {
            self.notifier.error(&format!("Feedback {id} not found"));
            return;
        }

        // Analysis first: an item without an analysis is a valid state, an
        // analysis without its item is not.
        self.analysis_results = match self.repository.delete_analysis_result(id) {
            Ok(analyses) => analyses,
            Err(e) => {
                tracing::error!("[FeedbackStore] Failed to delete analysis {}: {}", id, e);
                self.notifier.error(&format!("Failed to delete feedback analysis: {e}"));
                return;
            }
        };

        match self.repository.delete_feedback_for_user(&username, id) {
            Ok(updated) => {
                self.user_feedback = updated;
                self.notifier.success("Feedback deleted");
            }
            Err(e) => {
                tracing::error!("[FeedbackStore] Failed to delete feedback {}: {}", id, e);
                self.notifier.error(&format!("Failed to delete feedback: {e}"));
            }
        }
    }

    /// Stores `analysis` for `id`, replacing any previous one. Returns `true`
    /// when it was persisted.
    pub fn save_analysis(&mut self, id: &str, analysis: AnalysisResult) -> bool {
        self.mount();

        match self.repository.save_analysis_result(id, analysis) {
            Ok(results) => {
                self.analysis_results = results;
                self.notifier.success("Analysis saved");
                true
            }
            Err(e) => {
                tracing::error!("[FeedbackStore] Failed to save analysis {}: {}", id, e);
                self.notifier.error(&format!("Failed to save analysis: {e}"));
                false
            }
        }
    }

    fn current_username(&self) -> Option<String> {
        self.current_user
            .as_ref()
            .map(|session| session.username().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::analysis::Sentiment;
    use folio_core::error::{FolioError, Result};
    use folio_core::notifier::RecordingNotifier;
    use folio_core::storage::{ANALYSIS_RESULTS_KEY, StorageScope, USER_FEEDBACK_KEY};
    use folio_infrastructure::{LocalFeedbackRepository, MemoryStorageScope};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Memory scope whose writes can be switched off, for every key or one.
    #[derive(Default)]
    struct FlakyScope {
        inner: MemoryStorageScope,
        fail_writes: AtomicBool,
        fail_key: Mutex<Option<&'static str>>,
    }

    impl FlakyScope {
        fn fail_only(&self, key: &'static str) {
            *self.fail_key.lock().unwrap() = Some(key);
        }

        fn check(&self, key: &str) -> Result<()> {
            if self.fail_writes.load(Ordering::SeqCst)
                || *self.fail_key.lock().unwrap() == Some(key)
            {
                return Err(FolioError::storage("disk full"));
            }
            Ok(())
        }
    }

    impl StorageScope for FlakyScope {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<()> {
            self.check(key)?;
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<()> {
            self.check(key)?;
            self.inner.remove_item(key)
        }
    }

    fn store() -> (Arc<FlakyScope>, Arc<RecordingNotifier>, FeedbackStore) {
        let scope = Arc::new(FlakyScope::default());
        let notifier = Arc::new(RecordingNotifier::new());
        let repository = Arc::new(LocalFeedbackRepository::new(scope.clone()));
        let mut store = FeedbackStore::new(repository, notifier.clone());
        store.mount();
        (scope, notifier, store)
    }

    fn analysis(sentiment: Sentiment) -> AnalysisResult {
        AnalysisResult::new(sentiment, "summary", "action")
    }

    #[test]
    fn test_view_is_hidden_until_mounted() {
        let repository = Arc::new(LocalFeedbackRepository::new(Arc::new(
            MemoryStorageScope::new(),
        )));
        let mut store = FeedbackStore::new(repository, Arc::new(RecordingNotifier::new()));
        assert!(store.view().is_none());

        store.mount();
        store.mount();
        assert!(store.is_mounted());
        assert!(store.view().is_some());
    }

    #[test]
    fn test_mount_hydrates_existing_session() {
        let scope = Arc::new(MemoryStorageScope::new());
        let repository = Arc::new(LocalFeedbackRepository::new(scope.clone()));
        repository.login_user("alice").unwrap();
        let item = repository
            .add_feedback_for_user("alice", FeedbackDraft::new("", "hello there"))
            .unwrap();
        repository
            .save_analysis_result(&item.id, analysis(Sentiment::Positive))
            .unwrap();

        let mut store = FeedbackStore::new(repository, Arc::new(RecordingNotifier::new()));
        store.mount();

        let view = store.view().unwrap();
        assert_eq!(view.current_user(), Some("alice"));
        assert_eq!(view.user_feedback(), &[item.clone()]);
        assert_eq!(
            view.analysis_for(&item.id).map(|a| a.sentiment),
            Some(Sentiment::Positive)
        );
    }

    #[test]
    fn test_login_notifications_follow_kind() {
        let (_, notifier, mut store) = store();
        store.login("alice", LoginKind::Signup);
        store.login("alice", LoginKind::Login);
        assert_eq!(
            notifier.successes(),
            vec!["Signed up as alice", "Logged in as alice"]
        );
    }

    #[test]
    fn test_add_requires_session() {
        let (_, notifier, mut store) = store();
        assert!(!store.add_feedback("Bug", "broken"));
        assert!(store.view().unwrap().user_feedback().is_empty());
        assert_eq!(notifier.errors(), vec!["Please log in to submit feedback"]);
    }

    #[test]
    fn test_add_empty_content_does_not_mutate() {
        let (_, notifier, mut store) = store();
        store.login("alice", LoginKind::Login);
        assert!(store.add_feedback("Title", "Something"));

        assert!(!store.add_feedback("Title", "   "));
        assert_eq!(store.view().unwrap().user_feedback().len(), 1);
        assert_eq!(notifier.last().unwrap().message, "Feedback content cannot be empty");
    }

    #[test]
    fn test_add_write_failure_leaves_state() {
        let (scope, notifier, mut store) = store();
        store.login("alice", LoginKind::Login);
        scope.fail_writes.store(true, Ordering::SeqCst);

        assert!(!store.add_feedback("Bug", "broken"));
        assert!(store.view().unwrap().user_feedback().is_empty());
        assert!(notifier.errors()[0].starts_with("Failed to save feedback"));
    }

    #[test]
    fn test_login_failure_keeps_previous_session() {
        let (scope, notifier, mut store) = store();
        store.login("alice", LoginKind::Login);
        scope.fail_writes.store(true, Ordering::SeqCst);

        store.login("bob", LoginKind::Login);
        assert_eq!(store.view().unwrap().current_user(), Some("alice"));
        assert!(notifier.errors()[0].starts_with("Could not start a session"));

        store.logout();
        assert_eq!(store.view().unwrap().current_user(), Some("alice"));
        assert_eq!(notifier.errors().len(), 2);
    }

    #[test]
    fn test_delete_failure_leaves_state() {
        let (scope, notifier, mut store) = store();
        store.login("alice", LoginKind::Login);
        store.add_feedback("Bug", "broken");
        let id = store.view().unwrap().user_feedback()[0].id.clone();
        store.save_analysis(&id, analysis(Sentiment::Negative));

        scope.fail_writes.store(true, Ordering::SeqCst);
        store.delete_feedback(&id);

        let view = store.view().unwrap();
        assert_eq!(view.user_feedback().len(), 1);
        assert!(view.analysis_for(&id).is_some());
        assert!(notifier.last().unwrap().message.starts_with("Failed to delete feedback"));
    }

    fn stored_items(scope: &Arc<FlakyScope>, user: &str) -> usize {
        LocalFeedbackRepository::new(scope.clone())
            .get_feedback_for_user(user)
            .len()
    }

    #[test]
    fn test_delete_with_failing_analysis_write_keeps_item() {
        let (scope, notifier, mut store) = store();
        store.login("alice", LoginKind::Login);
        store.add_feedback("Bug", "broken");
        let id = store.view().unwrap().user_feedback()[0].id.clone();
        store.save_analysis(&id, analysis(Sentiment::Negative));

        scope.fail_only(ANALYSIS_RESULTS_KEY);
        store.delete_feedback(&id);

        let view = store.view().unwrap();
        assert_eq!(view.user_feedback().len(), 1);
        assert!(view.analysis_for(&id).is_some());
        assert_eq!(stored_items(&scope, "alice"), 1);
        assert!(notifier.last().unwrap().message.starts_with("Failed to delete feedback analysis"));
    }

    #[test]
    fn test_delete_with_failing_item_write_matches_storage() {
        let (scope, notifier, mut store) = store();
        store.login("alice", LoginKind::Login);
        store.add_feedback("Bug", "broken");
        let id = store.view().unwrap().user_feedback()[0].id.clone();
        store.save_analysis(&id, analysis(Sentiment::Negative));

        scope.fail_only(USER_FEEDBACK_KEY);
        store.delete_feedback(&id);

        // The analysis is gone in both places, the item remains in both.
        let view = store.view().unwrap();
        assert_eq!(view.user_feedback().len(), 1);
        assert!(view.analysis_for(&id).is_none());
        assert_eq!(stored_items(&scope, "alice"), 1);
        let repository = LocalFeedbackRepository::new(scope.clone());
        assert!(repository.get_analysis(&id).is_none());
        assert!(notifier.last().unwrap().message.starts_with("Failed to delete feedback:"));
    }

    #[test]
    fn test_blank_username_is_refused() {
        let (_, notifier, mut store) = store();
        store.login("   ", LoginKind::Signup);
        assert_eq!(store.view().unwrap().current_user(), None);
        assert_eq!(notifier.errors(), vec!["Username cannot be empty"]);

        store.login("  alice ", LoginKind::Login);
        assert_eq!(store.view().unwrap().current_user(), Some("alice"));
        assert_eq!(notifier.successes(), vec!["Logged in as alice"]);
    }

    #[test]
    fn test_delete_without_session_or_id_is_silent_noop() {
        let (_, notifier, mut store) = store();
        store.delete_feedback("123");
        store.login("alice", LoginKind::Login);
        notifier.clear();
        store.delete_feedback("");
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn test_delete_unknown_id_reports_not_found() {
        let (_, notifier, mut store) = store();
        store.login("alice", LoginKind::Login);
        store.add_feedback("Bug", "broken");
        let before = store.view().unwrap().user_feedback().to_vec();

        store.delete_feedback("does-not-exist");
        assert_eq!(store.view().unwrap().user_feedback(), before.as_slice());
        assert_eq!(notifier.last().unwrap().message, "Feedback does-not-exist not found");
    }

    #[test]
    fn test_save_analysis_failure_reports_only() {
        let (scope, notifier, mut store) = store();
        scope.fail_writes.store(true, Ordering::SeqCst);

        assert!(!store.save_analysis("1", analysis(Sentiment::Neutral)));
        assert!(store.view().unwrap().analysis_results().is_empty());
        assert!(notifier.last().unwrap().message.starts_with("Failed to save analysis"));
    }

    #[test]
    fn test_mutation_before_mount_hydrates_first() {
        let scope = Arc::new(MemoryStorageScope::new());
        let repository = Arc::new(LocalFeedbackRepository::new(scope));
        repository.login_user("alice").unwrap();
        repository
            .add_feedback_for_user("alice", FeedbackDraft::new("", "older note"))
            .unwrap();

        let mut store = FeedbackStore::new(repository, Arc::new(RecordingNotifier::new()));
        assert!(store.add_feedback("", "newer note"));

        let view = store.view().unwrap();
        assert_eq!(view.user_feedback().len(), 2);
        assert_eq!(view.user_feedback()[0].content, "newer note");
    }
}
