//! JSON codec for the wallet file.
//!
//! The codec only moves bytes and checks shape. It has no knowledge of the
//! cipher; tokens pass through as opaque strings.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::Wallet;
use crate::error::{Result, VaultError};

/// Read and parse the wallet at `path`.
///
/// # Errors
///
/// - `VaultError::WalletNotFound` if nothing exists at `path`
/// - `VaultError::NotWellFormed` if the file is not JSON or lacks `master`/`keys`
/// - `VaultError::Io` for any other read failure
pub fn load(path: &Path) -> Result<Wallet> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Err(VaultError::WalletNotFound),
        Err(err) if err.kind() == ErrorKind::InvalidData => {
            return Err(VaultError::NotWellFormed("Wallet is not valid UTF-8".to_string()))
        }
        Err(err) => return Err(err.into()),
    };
    parse(&contents)
}

/// Serialize `wallet` and replace the file at `path`.
pub fn save(path: &Path, wallet: &Wallet) -> Result<()> {
    let json = serde_json::to_string(wallet)
        .map_err(|e| VaultError::InvalidInput(format!("Failed to serialize wallet: {}", e)))?;
    crate::fs::write_atomic(path, json.as_bytes())?;
    Ok(())
}

pub(crate) fn parse(contents: &str) -> Result<Wallet> {
    Ok(serde_json::from_str(contents)?)
}
