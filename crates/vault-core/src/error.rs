//! Error types for vault core operations.
//!
//! Every failure the wallet, cipher and vault layers can produce is one
//! variant of [`VaultError`]. The CLI layer maps these to user-facing
//! messages and exit codes.

use thiserror::Error;

/// Result type alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// No wallet file exists at the configured path
    #[error("Wallet not found")]
    WalletNotFound,

    /// The wallet file is not valid JSON or lacks `master`/`keys`
    #[error("Wallet is not well-formed: {0}")]
    NotWellFormed(String),

    /// The candidate password does not open this wallet.
    ///
    /// A canary mismatch and an authentication failure under the candidate
    /// password both end up here; the two cannot be told apart.
    #[error("Master password not recognized")]
    WrongMasterPassword,

    /// No stored entry decrypts to the requested key
    #[error("Key not present in wallet: {0}")]
    KeyNotFound(String),

    /// Token authentication failed (wrong key, corrupted or foreign token)
    #[error("Wrong key or tampered data")]
    WrongKeyOrTamperedData,

    /// A password was required but no source could supply one
    #[error("No password available")]
    PasswordUnavailable,

    /// Randomness or primitive setup failure
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        VaultError::NotWellFormed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_not_well_formed() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let mapped: VaultError = err.into();
        assert!(matches!(mapped, VaultError::NotWellFormed(_)));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let mapped: VaultError = err.into();
        assert!(mapped.to_string().contains("denied"));
    }

    #[test]
    fn test_key_not_found_names_key() {
        let err = VaultError::KeyNotFound("email".to_string());
        assert_eq!(err.to_string(), "Key not present in wallet: email");
    }
}
