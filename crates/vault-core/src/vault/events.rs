//! Notices the vault emits while it works.
//!
//! The vault never logs directly. It hands each event to the [`EventSink`]
//! it was built with; [`TracingEvents`] forwards them to `tracing`.

use std::path::Path;
use std::time::Duration;

use crate::error::VaultError;

/// Something worth telling the operator about.
#[derive(Debug)]
pub enum VaultEvent<'a> {
    /// No wallet at the path; one is about to be created.
    WalletMissing { path: &'a Path },
    /// A new wallet was written.
    WalletCreated { path: &'a Path },
    /// The verified password is now cached for `ttl`.
    SessionCached { ttl: Duration },
    /// An operation failed and is returning `error`.
    Failure { error: &'a VaultError },
}

/// Receives vault events.
pub trait EventSink {
    fn record(&self, event: &VaultEvent<'_>);
}

/// Forwards events to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEvents;

impl EventSink for TracingEvents {
    fn record(&self, event: &VaultEvent<'_>) {
        match event {
            VaultEvent::WalletMissing { path } => {
                tracing::info!(path = %path.display(), "wallet does not exist, creating it")
            }
            VaultEvent::WalletCreated { path } => {
                tracing::info!(path = %path.display(), "created new wallet")
            }
            VaultEvent::SessionCached { ttl } => {
                tracing::info!(ttl_secs = ttl.as_secs(), "keeping the wallet open")
            }
            VaultEvent::Failure { error } => tracing::error!(%error, "vault operation failed"),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl EventSink for NoEvents {
    fn record(&self, _event: &VaultEvent<'_>) {}
}
