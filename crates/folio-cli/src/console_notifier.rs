use colored::Colorize;
use folio_application::TracingNotifier;
use folio_core::notifier::Notifier;

/// Prints notifications to stdout and mirrors them into the log.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    log: TracingNotifier,
}

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message);
        self.log.success(message);
    }

    fn error(&self, message: &str) {
        println!("{} {}", "✗".red().bold(), message.red());
        self.log.error(message);
    }
}
