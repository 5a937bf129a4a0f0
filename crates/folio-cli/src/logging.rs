use std::path::Path;

use folio_core::config::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const NOTIFY_TARGET: &str = "folio::notify";

const FOLIO_TARGETS: &[&str] = &[
    "folio",
    "folio_core",
    "folio_infrastructure",
    "folio_interaction",
    "folio_application",
    "folio_cli",
];

/// Installs the global subscriber: stderr always, plus a daily rolling file in
/// `logs_dir` when `settings.file` is set. `RUST_LOG` overrides the level.
///
/// The returned guard flushes the file writer and must outlive `main`'s work.
pub fn init(
    settings: &LoggingSettings,
    level_override: Option<&str>,
    logs_dir: &Path,
) -> Option<WorkerGuard> {
    let level = level_override.unwrap_or(&settings.level).to_lowercase();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = FOLIO_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .chain(["reqwest=warn".to_string(), "hyper=warn".to_string()])
            .collect::<Vec<_>>()
            .join(",");
        EnvFilter::new(directives)
    });

    // Notifications are already printed by the console notifier.
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter_fn(|metadata| metadata.target() != NOTIFY_TARGET));

    let (file_layer, guard) = if settings.file {
        let appender = tracing_appender::rolling::daily(logs_dir, "folio.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
