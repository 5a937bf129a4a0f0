//! Review Service
//!
//! Sends one feedback item at a time to the review gateway and stores the
//! result through the [`FeedbackStore`]. While a review is outstanding its id
//! is held as the analyzing token and any further request is refused.

use std::sync::{Arc, Mutex as StdMutex};

use folio_core::analysis::AnalysisResult;
use folio_core::error::{FolioError, Result};
use folio_core::notifier::Notifier;
use folio_core::review::{ReviewGateway, ReviewRequest};
use tokio::sync::Mutex;

use crate::feedback_store::FeedbackStore;

pub struct ReviewService {
    gateway: Arc<dyn ReviewGateway>,
    store: Arc<Mutex<FeedbackStore>>,
    notifier: Arc<dyn Notifier>,
    analyzing_id: StdMutex<Option<String>>,
}

/// Clears the analyzing token when the review finishes, however it finishes.
struct AnalyzingGuard<'a> {
    slot: &'a StdMutex<Option<String>>,
}

impl Drop for AnalyzingGuard<'_> {
    fn drop(&mut self) {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

impl ReviewService {
    pub fn new(
        gateway: Arc<dyn ReviewGateway>,
        store: Arc<Mutex<FeedbackStore>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            store,
            notifier,
            analyzing_id: StdMutex::new(None),
        }
    }

    /// The id currently being reviewed, if any.
    pub fn analyzing_id(&self) -> Option<String> {
        self.analyzing_id
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn claim(&self, id: &str) -> Result<AnalyzingGuard<'_>> {
        let mut slot = self
            .analyzing_id
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(current) = slot.as_ref() {
            return Err(FolioError::ReviewInProgress(current.clone()));
        }
        *slot = Some(id.to_string());
        Ok(AnalyzingGuard {
            slot: &self.analyzing_id,
        })
    }

    /// Reviews the current user's feedback item `id` and saves the analysis.
    ///
    /// Every failure is also reported through the notifier. The store lock is
    /// not held while the gateway call is outstanding, so the item is looked up
    /// again before saving and a result for a deleted item is dropped.
    pub async fn review(&self, id: &str) -> Result<AnalysisResult> {
        let _guard = match self.claim(id) {
            Ok(guard) => guard,
            Err(e) => {
                self.notifier
                    .error("Another review is still running. Please wait for it to finish.");
                return Err(e);
            }
        };

        let content = self.store.lock().await.feedback_content(id);
        let Some(content) = content else {
            self.notifier.error(&format!("Feedback {id} not found"));
            return Err(FolioError::not_found("feedback", id));
        };

        tracing::info!("[ReviewService] Reviewing feedback {}", id);
        let analysis = match self.gateway.review(ReviewRequest::new(content)).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!("[ReviewService] Review of {} failed: {}", id, e);
                self.notifier.error(&format!("AI review failed: {e}"));
                return Err(e);
            }
        };

        let mut store = self.store.lock().await;
        if store.feedback_content(id).is_none() {
            tracing::info!("[ReviewService] Feedback {} was deleted during review", id);
            self.notifier.error(&format!("Feedback {id} was deleted; analysis discarded"));
            return Err(FolioError::not_found("feedback", id));
        }
        if !store.save_analysis(id, analysis.clone()) {
            return Err(FolioError::storage(format!(
                "Analysis for {id} could not be saved"
            )));
        }

        Ok(analysis)
    }
}
