//! The persisted wallet: a master-password canary plus encrypted entries.

pub mod codec;

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::crypto::{derive, encrypt, EncryptedToken};
use crate::error::{Result, VaultError};

pub use codec::{load, save};

/// On-disk wallet structure.
///
/// Both fields are required when reading. Entry keys are unique only as
/// ciphertexts: adding one plaintext key twice stores two entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    master: EncryptedToken,
    keys: IndexMap<EncryptedToken, EncryptedToken>,
}

impl Wallet {
    /// Create an empty wallet around an existing canary token.
    pub fn new(master: EncryptedToken) -> Self {
        Self {
            master,
            keys: IndexMap::new(),
        }
    }

    /// The canary: the master password encrypted under its own derived key.
    pub fn master(&self) -> &EncryptedToken {
        &self.master
    }

    /// Encrypted `(key, value)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&EncryptedToken, &EncryptedToken)> {
        self.keys.iter()
    }

    /// Insert an encrypted pair. Never replaces an existing plaintext key;
    /// two encryptions of the same key are distinct tokens.
    pub fn insert(&mut self, key: EncryptedToken, value: EncryptedToken) {
        self.keys.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Create and persist a fresh wallet protected by `master_password`.
///
/// # Errors
///
/// Returns `VaultError::InvalidInput` if something already exists at `path`;
/// an existing wallet is never overwritten.
pub fn create_new(path: &Path, master_password: &str) -> Result<Wallet> {
    if path.exists() {
        return Err(VaultError::InvalidInput(format!(
            "Wallet already exists at {}",
            path.display()
        )));
    }

    let key = derive(master_password);
    let wallet = Wallet::new(encrypt(master_password, &key)?);
    save(path, &wallet)?;
    Ok(wallet)
}
