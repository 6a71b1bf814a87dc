//! Path resolution for config and wallet files.

use std::path::{Path, PathBuf};

use crate::config::{default_config_path, default_wallet_path, VaultConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking VAULT_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the wallet path: explicit flag, then config, then the default.
pub fn resolve_wallet_path(
    explicit: Option<&str>,
    config: Option<&VaultConfig>,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit.filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.wallet.path));
    }
    default_wallet_path()
}

/// Error message when the wallet file is missing.
pub fn missing_wallet_message(path: &Path) -> String {
    format!("No wallet found at {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = VaultConfig::new(Path::new("/from/config.json"), 10);
        let path = resolve_wallet_path(Some("/explicit.json"), Some(&config)).unwrap();
        assert_eq!(path, PathBuf::from("/explicit.json"));
    }

    #[test]
    fn test_config_path_used_without_flag() {
        let config = VaultConfig::new(Path::new("/from/config.json"), 10);
        let path = resolve_wallet_path(None, Some(&config)).unwrap();
        assert_eq!(path, PathBuf::from("/from/config.json"));

        let path = resolve_wallet_path(Some("  "), Some(&config)).unwrap();
        assert_eq!(path, PathBuf::from("/from/config.json"));
    }

    #[test]
    fn test_missing_wallet_message_names_path() {
        let message = missing_wallet_message(Path::new("/tmp/none.json"));
        assert!(message.contains("/tmp/none.json"));
    }
}
