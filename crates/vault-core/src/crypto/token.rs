//! Fernet authenticated tokens.
//!
//! A token is the url-safe base64 encoding of
//!
//! ```text
//! [ 0x80 ][ timestamp u64 BE ][ IV (16) ][ AES-128-CBC ciphertext ][ HMAC-SHA256 (32) ]
//! ```
//!
//! The HMAC covers everything before it and is keyed with the first half of
//! the [`DerivedKey`]; AES uses the second half. Tokens are plain text so
//! they can live directly in the JSON wallet file.

use aes::Aes128;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::key::DerivedKey;
use crate::error::{Result, VaultError};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type HmacSha256 = Hmac<Sha256>;

const VERSION: u8 = 0x80;
const TIMESTAMP_LEN: usize = 8;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;
const HMAC_LEN: usize = 32;
const HEADER_LEN: usize = 1 + TIMESTAMP_LEN + IV_LEN;

/// An opaque authenticated ciphertext, stored as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedToken(String);

impl EncryptedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for EncryptedToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EncryptedToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for EncryptedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encrypt `plaintext` under `key`.
///
/// Each call draws a fresh IV and stamps the current time, so encrypting the
/// same plaintext twice yields two different tokens.
///
/// # Errors
///
/// Returns `VaultError::Crypto` if the OS randomness source fails.
///
/// # Examples
///
/// ```
/// use vault_core::crypto::{decrypt, derive, encrypt};
///
/// let key = derive("hunter2");
/// let token = encrypt("a@b.com", &key).unwrap();
/// assert_eq!(decrypt(&token, &key).unwrap(), "a@b.com");
/// ```
pub fn encrypt(plaintext: &str, key: &DerivedKey) -> Result<EncryptedToken> {
    let mut iv = [0u8; IV_LEN];
    getrandom::getrandom(&mut iv)
        .map_err(|e| VaultError::Crypto(format!("Randomness source failed: {}", e)))?;
    let timestamp = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0);
    encrypt_with(plaintext.as_bytes(), key, timestamp, &iv)
}

fn encrypt_with(
    plaintext: &[u8],
    key: &DerivedKey,
    timestamp: u64,
    iv: &[u8; IV_LEN],
) -> Result<EncryptedToken> {
    let ciphertext = Aes128CbcEnc::new_from_slices(key.encryption_key(), iv)
        .map_err(|e| VaultError::Crypto(format!("Failed to create cipher: {}", e)))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut payload = Vec::with_capacity(HEADER_LEN + ciphertext.len() + HMAC_LEN);
    payload.push(VERSION);
    payload.extend_from_slice(&timestamp.to_be_bytes());
    payload.extend_from_slice(iv);
    payload.extend_from_slice(&ciphertext);

    let tag = signer(key)?.chain_update(&payload).finalize().into_bytes();
    payload.extend_from_slice(&tag);

    Ok(EncryptedToken(URL_SAFE.encode(&payload)))
}

/// Decrypt `token` under `key`.
///
/// # Errors
///
/// Returns `VaultError::WrongKeyOrTamperedData` when the token is not
/// authentic under `key`: wrong key, any modified byte, a malformed token, or
/// a plaintext that is not UTF-8. The cause is deliberately not reported.
pub fn decrypt(token: &EncryptedToken, key: &DerivedKey) -> Result<String> {
    let data = URL_SAFE
        .decode(token.as_str().as_bytes())
        .map_err(|_| VaultError::WrongKeyOrTamperedData)?;

    if data.len() < HEADER_LEN + HMAC_LEN || data[0] != VERSION {
        return Err(VaultError::WrongKeyOrTamperedData);
    }

    let (signed, tag) = data.split_at(data.len() - HMAC_LEN);
    signer(key)?
        .chain_update(signed)
        .verify_slice(tag)
        .map_err(|_| VaultError::WrongKeyOrTamperedData)?;

    let iv = &signed[1 + TIMESTAMP_LEN..HEADER_LEN];
    let ciphertext = &signed[HEADER_LEN..];
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(VaultError::WrongKeyOrTamperedData);
    }

    let plaintext = Aes128CbcDec::new_from_slices(key.encryption_key(), iv)
        .map_err(|e| VaultError::Crypto(format!("Failed to create cipher: {}", e)))?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| VaultError::WrongKeyOrTamperedData)?;

    String::from_utf8(plaintext).map_err(|_| VaultError::WrongKeyOrTamperedData)
}

fn signer(key: &DerivedKey) -> Result<HmacSha256> {
    <HmacSha256 as Mac>::new_from_slice(key.signing_key())
        .map_err(|e| VaultError::Crypto(format!("Failed to create HMAC: {}", e)))
}
