//! CLI error types for structured error handling.
//!
//! Core errors are mapped onto a small set of CLI errors, each with its own
//! exit code and an optional hint line.

use std::fmt;

use vault_core::VaultError;

use crate::constants::{exit_codes, PASSWORD_ENV};

/// CLI-specific errors with associated exit codes.
#[derive(Debug, Clone)]
pub enum CliError {
    /// Resource not found (wallet, key)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong or missing master password)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Wallet file is damaged or not a wallet
    Integrity { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// Anything else
    Failed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } | CliError::Integrity { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) | CliError::Failed(message) => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and optional hint.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Map a core error to its CLI counterpart.
    pub fn from_vault(err: &VaultError) -> Self {
        match err {
            VaultError::WalletNotFound => CliError::not_found(
                "No wallet found.",
                "Hint: Run `vault init` or pass --wallet /path/to/wallet.json",
            ),
            VaultError::KeyNotFound(key) => CliError::not_found(
                format!("Key \"{}\" is not in this wallet.", key),
                "Hint: Run `vault list` to see stored keys.",
            ),
            VaultError::WrongMasterPassword => {
                CliError::auth_failed("Master password not recognized.")
            }
            VaultError::PasswordUnavailable => CliError::auth_failed_with_hint(
                "No master password provided and no TTY available.",
                format!("Hint: Set {} or run from a terminal.", PASSWORD_ENV),
            ),
            VaultError::NotWellFormed(detail) => CliError::Integrity {
                message: format!("Wallet file is not well-formed: {}", detail),
                hint: "Hint: The file must contain both \"master\" and \"keys\".".to_string(),
            },
            VaultError::InvalidInput(message) => CliError::invalid_input(message.clone()),
            other => CliError::Failed(other.to_string()),
        }
    }

    /// Map any error coming out of a command handler.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(cli_error) = err.downcast_ref::<CliError>() {
            return cli_error.clone();
        }
        if let Some(vault_error) = err.downcast_ref::<VaultError>() {
            return CliError::from_vault(vault_error);
        }
        CliError::Failed(format!("{:#}", err))
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::Integrity { .. } => exit_codes::INTEGRITY_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Failed(_) => exit_codes::GENERAL,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}
