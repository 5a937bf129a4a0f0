//! Notifier that writes to the tracing log.

use folio_core::notifier::Notifier;

/// Routes notifications into `tracing`: successes at `info`, errors at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "folio::notify", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "folio::notify", "{}", message);
    }
}
