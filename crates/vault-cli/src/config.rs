use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CACHE_TTL_SECONDS;

#[derive(Debug, Serialize, Deserialize)]
pub struct VaultConfig {
    pub wallet: WalletSection,
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WalletSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSection {
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
        }
    }
}

fn default_cache_ttl_seconds() -> u64 {
    DEFAULT_CACHE_TTL_SECONDS
}

impl VaultConfig {
    pub fn new(wallet_path: &Path, cache_ttl_seconds: u64) -> Self {
        Self {
            wallet: WalletSection {
                path: wallet_path.to_string_lossy().to_string(),
            },
            session: SessionSection { cache_ttl_seconds },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_wallet_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("wallet.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<VaultConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &VaultConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("vault"));
        }
    }
    Ok(home_dir()?.join(".config").join("vault"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("vault"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("vault"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = VaultConfig::new(Path::new("/data/wallet.json"), 30);

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded.wallet.path, "/data/wallet.json");
        assert_eq!(loaded.session.cache_ttl_seconds, 30);
    }

    #[test]
    fn test_session_section_defaults() {
        let config: VaultConfig = toml::from_str("[wallet]\npath = \"w.json\"\n").unwrap();
        assert_eq!(
            config.session.cache_ttl_seconds,
            DEFAULT_CACHE_TTL_SECONDS
        );

        let config: VaultConfig =
            toml::from_str("[wallet]\npath = \"w.json\"\n\n[session]\n").unwrap();
        assert_eq!(
            config.session.cache_ttl_seconds,
            DEFAULT_CACHE_TTL_SECONDS
        );
    }

    #[test]
    fn test_missing_wallet_section_fails() {
        let result = toml::from_str::<VaultConfig>("[session]\ncache_ttl_seconds = 5\n");
        assert!(result.is_err());
    }
}
