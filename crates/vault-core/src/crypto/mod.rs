//! Cryptographic operations for the vault.
//!
//! - **PBKDF2-HMAC-SHA256**: master password → 32-byte [`DerivedKey`]
//! - **Fernet tokens**: AES-128-CBC + HMAC-SHA256, url-safe base64 text
//!
//! ## Security Model
//!
//! - Every wallet value and key name is an independent authenticated token
//! - Tokens only decrypt under the exact key that produced them
//! - Derived keys are zeroized on drop and never persisted
//!
//! ## Known weakness
//!
//! The derivation salt is a fixed constant shared by every wallet. Swapping
//! it for a per-wallet random salt would make existing wallet files
//! unreadable, so it is kept for file compatibility.

pub mod key;
pub mod token;

pub use key::{derive, DerivedKey};
pub use token::{decrypt, encrypt, EncryptedToken};
