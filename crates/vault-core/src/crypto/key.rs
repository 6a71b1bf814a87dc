//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! The salt and round count are fixed so that the same master password
//! always yields the same key, which is what lets a wallet written by one
//! process be opened by another.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::error::{Result, VaultError};

/// Application-wide derivation salt.
const SALT: &[u8] = b"salt";

/// PBKDF2 round count.
const ITERATIONS: u32 = 100_000;

/// Length of derived key in bytes (16 signing + 16 encryption).
pub const KEY_LENGTH: usize = 32;

/// A symmetric key derived from the master password.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Parse a url-safe base64 key string, the textual key format of Fernet.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let decoded = Zeroizing::new(
            URL_SAFE
                .decode(encoded.trim().as_bytes())
                .map_err(|e| VaultError::Crypto(format!("Invalid key encoding: {}", e)))?,
        );
        let bytes: [u8; KEY_LENGTH] = decoded.as_slice().try_into().map_err(|_| {
            VaultError::Crypto(format!(
                "Key must be {} bytes (got {})",
                KEY_LENGTH,
                decoded.len()
            ))
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Url-safe base64 form of the key.
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(URL_SAFE.encode(self.key))
    }

    /// Raw key bytes. Avoid storing or logging this value.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }

    pub(crate) fn signing_key(&self) -> &[u8] {
        &self.key[..KEY_LENGTH / 2]
    }

    pub(crate) fn encryption_key(&self) -> &[u8] {
        &self.key[KEY_LENGTH / 2..]
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the wallet key for `password`.
///
/// Deterministic: the same password always produces the same key.
///
/// # Examples
///
/// ```
/// use vault_core::crypto::derive;
///
/// let a = derive("hunter2");
/// let b = derive("hunter2");
/// assert_eq!(a.as_bytes(), b.as_bytes());
/// ```
pub fn derive(password: &str) -> DerivedKey {
    derive_with(password.as_bytes(), SALT, ITERATIONS)
}

fn derive_with(password: &[u8], salt: &[u8], iterations: u32) -> DerivedKey {
    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key_bytes);
    let key = DerivedKey::from_bytes(key_bytes);
    zeroize::Zeroize::zeroize(&mut key_bytes);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let key1 = derive("test-passphrase");
        let key2 = derive("test-passphrase");

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let key1 = derive("passphrase-one");
        let key2 = derive("passphrase-two");

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_password_still_derives() {
        let key = derive("");
        assert_eq!(key.as_bytes().len(), KEY_LENGTH);
    }

    #[test]
    fn test_pbkdf2_known_vector() {
        // PBKDF2-HMAC-SHA256, P = "password", S = "salt", c = 1, dkLen = 32
        let key = derive_with(b"password", b"salt", 1);
        assert_eq!(
            hex::encode(key.as_bytes()),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn test_base64_round_trip() {
        let key = derive("hunter2");
        let encoded = key.to_base64();
        assert_eq!(encoded.len(), 44);

        let parsed = DerivedKey::from_base64(&encoded).unwrap();
        assert_eq!(parsed.as_bytes(), key.as_bytes());
    }

    #[test]
    fn test_from_base64_rejects_wrong_length() {
        let result = DerivedKey::from_base64("c2hvcnQ=");
        assert!(matches!(result, Err(VaultError::Crypto(_))));
    }

    #[test]
    fn test_key_halves() {
        let key = derive("hunter2");
        assert_eq!(key.signing_key(), &key.as_bytes()[..16]);
        assert_eq!(key.encryption_key(), &key.as_bytes()[16..]);
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive("test-passphrase");

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
