//! Wires configuration, storage and the review gateway together.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use folio_core::config::FolioConfig;
use folio_core::notifier::Notifier;
use folio_core::review::ReviewGateway;
use folio_infrastructure::{
    FileStorageScope, FolioPaths, LocalFeedbackRepository, SecretServiceImpl,
};
use folio_interaction::GeminiReviewGateway;
use tokio::sync::Mutex;

use crate::feedback_store::FeedbackStore;
use crate::review_service::ReviewService;

pub struct AppBootstrap {
    pub paths: FolioPaths,
    pub config: FolioConfig,
    pub store: Arc<Mutex<FeedbackStore>>,
    notifier: Arc<dyn Notifier>,
    scope: Arc<FileStorageScope>,
    secrets: SecretServiceImpl,
}

impl AppBootstrap {
    /// Opens the file-backed storage scope and mounts the store.
    pub fn new(
        paths: FolioPaths,
        config: FolioConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let storage_file = paths
            .storage_file(config.storage.dir.as_deref())
            .context("Failed to resolve storage location")?;
        tracing::debug!("[Bootstrap] Using storage scope {}", storage_file.display());

        let scope = Arc::new(FileStorageScope::new(storage_file));
        let repository = Arc::new(LocalFeedbackRepository::new(scope.clone()));

        let mut store = FeedbackStore::new(repository, notifier.clone());
        store.mount();

        let secrets = SecretServiceImpl::new(&paths).context("Failed to resolve secret file")?;

        Ok(Self {
            paths,
            config,
            store: Arc::new(Mutex::new(store)),
            notifier,
            scope,
            secrets,
        })
    }

    /// The JSON file backing the storage scope.
    pub fn storage_file(&self) -> &Path {
        self.scope.path()
    }

    pub fn secrets(&self) -> &SecretServiceImpl {
        &self.secrets
    }

    /// Builds a review service backed by Gemini. Fails when no API key is configured.
    pub async fn review_service(&self) -> Result<ReviewService> {
        let gemini = self.secrets.gemini().await?;
        let gateway = GeminiReviewGateway::from_settings(&self.config.review, &gemini)?;
        tracing::debug!("[Bootstrap] Review gateway ready (model {})", gateway.model());
        Ok(self.review_service_with(Arc::new(gateway)))
    }

    /// Builds a review service over any gateway.
    pub fn review_service_with(&self, gateway: Arc<dyn ReviewGateway>) -> ReviewService {
        ReviewService::new(gateway, self.store.clone(), self.notifier.clone())
    }
}
