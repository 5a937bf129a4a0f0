pub mod config_service;
pub mod local_feedback_repository;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::local_feedback_repository::LocalFeedbackRepository;
pub use crate::paths::FolioPaths;
pub use crate::secret_service::SecretServiceImpl;
pub use crate::storage::{FileStorageScope, MemoryStorageScope};
