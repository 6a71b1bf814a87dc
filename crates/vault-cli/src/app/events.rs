//! Vault events as the CLI reports them.

use std::cell::Cell;

use vault_core::{EventSink, TracingEvents, VaultEvent};

/// Logs events through `tracing` and prints operator notes to stderr.
///
/// Failures are logged at debug level only; `main` prints the error itself.
pub struct CliEvents {
    quiet: bool,
    cache_noted: Cell<bool>,
}

impl CliEvents {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            cache_noted: Cell::new(false),
        }
    }
}

impl EventSink for CliEvents {
    fn record(&self, event: &VaultEvent<'_>) {
        match event {
            VaultEvent::Failure { error } => {
                tracing::debug!(%error, "vault operation failed");
            }
            VaultEvent::SessionCached { ttl } => {
                TracingEvents.record(event);
                if !self.quiet && !self.cache_noted.replace(true) {
                    eprintln!(
                        "Note: The master password stays cached for {}s after each unlock in this shell.",
                        ttl.as_secs()
                    );
                }
            }
            VaultEvent::WalletCreated { path } => {
                TracingEvents.record(event);
                if !self.quiet {
                    eprintln!("Created new wallet at {}", path.display());
                }
            }
            _ => TracingEvents.record(event),
        }
    }
}
