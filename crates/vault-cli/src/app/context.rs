//! Application context for the Vault CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use std::path::PathBuf;
use std::time::Duration;

use once_cell::unsync::OnceCell;
use vault_core::Vault;

use crate::cli::Cli;
use crate::config::{read_config, VaultConfig};
use crate::constants::DEFAULT_CACHE_TTL_SECONDS;
use crate::errors::CliError;
use crate::prompt::TerminalPrompt;

use super::events::CliEvents;
use super::resolver::{missing_wallet_message, resolve_config_path, resolve_wallet_path};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<VaultConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Check if prompting is disabled.
    pub fn no_input(&self) -> bool {
        self.cli.no_input
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&VaultConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                return Ok::<_, anyhow::Error>(None);
            }
            tracing::debug!(path = %path.display(), "loading config");
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    /// Wallet path from `--wallet`, the config file, or the default location.
    pub fn wallet_path(&self) -> anyhow::Result<PathBuf> {
        resolve_wallet_path(self.cli.wallet.as_deref(), self.config()?)
    }

    /// Session ttl for `shell`: `--ttl`, then config, then the default.
    pub fn cache_ttl(&self) -> anyhow::Result<Duration> {
        if let Some(seconds) = self.cli.ttl {
            return Ok(Duration::from_secs(seconds));
        }
        let seconds = self
            .config()?
            .map(|config| config.session.cache_ttl_seconds)
            .unwrap_or(DEFAULT_CACHE_TTL_SECONDS);
        Ok(Duration::from_secs(seconds))
    }

    /// Open the configured wallet.
    ///
    /// Unlike the library, the CLI never creates a wallet implicitly; that is
    /// what `vault init` is for.
    pub fn open_vault(&self, ttl: Duration) -> anyhow::Result<Vault> {
        let path = self.wallet_path()?;
        if !path.exists() {
            return Err(CliError::not_found(
                missing_wallet_message(&path),
                "Hint: Run `vault init` or pass --wallet /path/to/wallet.json",
            )
            .into());
        }

        let vault = Vault::builder(path)
            .ttl(ttl)
            .prompt(TerminalPrompt::new(self.no_input()))
            .events(CliEvents::new(self.quiet()))
            .open()?;
        Ok(vault)
    }
}
