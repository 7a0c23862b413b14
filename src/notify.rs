//! Console notifications for the CLI.

use autolinker_core::host::Notifier;

/// Prints notifications to stdout, or only logs them when quiet.
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// For commands whose stdout must stay machine-readable.
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "autolink::notice", "{}", message);
        if !self.quiet {
            println!("{}", message);
        }
    }
}
