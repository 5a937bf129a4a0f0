//! Secret management service trait.

use crate::config::SecretConfig;
use crate::error::Result;

/// Loads API keys from secure storage.
///
/// Implementations must keep secret values out of logs and error messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Checks if the secret file exists.
    async fn secret_file_exists(&self) -> bool;
}
