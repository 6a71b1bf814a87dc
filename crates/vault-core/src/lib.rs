//! # Vault Core
//!
//! Core library for Vault - a local secret store kept in a single
//! encrypted wallet file, protected by one master password.
//!
//! This crate provides the encryption scheme, the wallet file format and the
//! unlock/session logic, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: PBKDF2 key derivation and Fernet authenticated tokens
//! - **wallet**: Wallet data model and JSON codec
//! - **vault**: Unlock state machine, session cache, add/get/list
//! - **fs**: Atomic file replacement
//!
//! ## Example
//!
//! ```no_run
//! use vault_core::Vault;
//!
//! let mut vault = Vault::builder("wallet.json")
//!     .master_password("hunter2")
//!     .open()?;
//! vault.add("email", "a@b.com", Some("hunter2"))?;
//! assert_eq!(vault.get("email", None)?, "a@b.com");
//! # Ok::<(), vault_core::VaultError>(())
//! ```

pub mod crypto;
pub mod error;
pub mod fs;
pub mod vault;
pub mod wallet;

pub use crypto::{DerivedKey, EncryptedToken};
pub use error::{Result, VaultError};
pub use vault::{
    Clock, EventSink, FixedPrompt, NoEvents, NoPrompt, PasswordPrompt, SystemClock,
    TracingEvents, Unlocked, Vault, VaultBuilder, VaultEvent, DEFAULT_TTL,
};
pub use wallet::Wallet;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
