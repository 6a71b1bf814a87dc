//! Password source used when no password is passed or cached.

use crate::error::{Result, VaultError};

/// Supplies a master password on demand.
///
/// Implementations must not echo the password. Returning
/// `VaultError::PasswordUnavailable` signals that no source exists (for
/// example, no TTY).
pub trait PasswordPrompt {
    fn ask(&self, message: &str) -> Result<String>;
}

/// A prompt that never yields a password. The default for library use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

impl PasswordPrompt for NoPrompt {
    fn ask(&self, _message: &str) -> Result<String> {
        Err(VaultError::PasswordUnavailable)
    }
}

/// A prompt that always answers with the same password.
#[derive(Clone)]
pub struct FixedPrompt(String);

impl FixedPrompt {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }
}

impl PasswordPrompt for FixedPrompt {
    fn ask(&self, _message: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

impl std::fmt::Debug for FixedPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FixedPrompt([REDACTED])")
    }
}
