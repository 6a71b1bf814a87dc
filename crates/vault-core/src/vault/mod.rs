//! The vault: unlock, session caching, and the add/get/list operations.
//!
//! A [`Vault`] is Locked until a password is verified against the wallet's
//! canary. With a non-zero ttl the verified password is kept in memory and
//! trusted for later calls until `ttl` has elapsed since the last unlock;
//! within that window any password argument is ignored.
//!
//! The wallet file is re-read by every operation, so the file on disk is
//! always the source of truth. No operation retries: every failure is
//! reported to the [`EventSink`] and returned.

pub mod events;
pub mod prompt;
pub mod session;

use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexSet;
use zeroize::Zeroizing;

use crate::crypto::{decrypt, derive, encrypt, DerivedKey, EncryptedToken};
use crate::error::{Result, VaultError};
use crate::wallet::{self, Wallet};

pub use events::{EventSink, NoEvents, TracingEvents, VaultEvent};
pub use prompt::{FixedPrompt, NoPrompt, PasswordPrompt};
pub use session::{Clock, SystemClock};

use session::Session;

/// How long a verified password stays cached unless configured otherwise.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10);

const PROMPT_MESSAGE: &str = "Password";

/// Result of a successful unlock: the verified password, its key, and the
/// wallet snapshot it was checked against.
pub struct Unlocked {
    password: Zeroizing<String>,
    key: DerivedKey,
    wallet: Wallet,
}

impl Unlocked {
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn key(&self) -> &DerivedKey {
        &self.key
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn into_wallet(self) -> Wallet {
        self.wallet
    }
}

impl std::fmt::Debug for Unlocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unlocked")
            .field("password", &"[REDACTED]")
            .field("key", &self.key)
            .field("entries", &self.wallet.len())
            .finish()
    }
}

/// Configures and opens a [`Vault`].
pub struct VaultBuilder {
    path: PathBuf,
    ttl: Duration,
    master_password: Option<Zeroizing<String>>,
    prompt: Box<dyn PasswordPrompt>,
    events: Box<dyn EventSink>,
    clock: Box<dyn Clock>,
}

impl VaultBuilder {
    /// How long a verified password stays cached. Zero disables caching.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Password for a wallet that does not exist yet.
    pub fn master_password(mut self, password: impl Into<String>) -> Self {
        self.master_password = Some(Zeroizing::new(password.into()));
        self
    }

    pub fn prompt(mut self, prompt: impl PasswordPrompt + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn events(mut self, events: impl EventSink + 'static) -> Self {
        self.events = Box::new(events);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Open the vault, creating the wallet first if the path is empty.
    ///
    /// # Errors
    ///
    /// - `VaultError::WalletNotFound` if no wallet exists and neither the
    ///   builder nor the prompt can supply a master password; nothing is
    ///   written in that case
    /// - `VaultError::NotWellFormed` if the file exists but is not a wallet
    pub fn open(self) -> Result<Vault> {
        let VaultBuilder {
            path,
            ttl,
            master_password,
            prompt,
            events,
            clock,
        } = self;

        let vault = Vault {
            path,
            session: Session::new(ttl),
            prompt,
            events,
            clock,
        };
        let result = vault.init_wallet(master_password.as_ref().map(|p| p.as_str()));
        vault.report(result)?;
        Ok(vault)
    }
}

/// Coordinator over one wallet file.
///
/// Not thread-safe: every operation that may touch the session takes
/// `&mut self`.
pub struct Vault {
    path: PathBuf,
    session: Session,
    prompt: Box<dyn PasswordPrompt>,
    events: Box<dyn EventSink>,
    clock: Box<dyn Clock>,
}

impl Vault {
    pub fn builder(path: impl Into<PathBuf>) -> VaultBuilder {
        VaultBuilder {
            path: path.into(),
            ttl: DEFAULT_TTL,
            master_password: None,
            prompt: Box::new(NoPrompt),
            events: Box::new(TracingEvents),
            clock: Box::new(SystemClock),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl(&self) -> Duration {
        self.session.ttl()
    }

    /// Whether a cached password is still inside its ttl window.
    pub fn is_unlocked(&self) -> bool {
        self.session.is_valid(self.clock.now())
    }

    /// Drop the cached password immediately.
    pub fn lock(&mut self) {
        self.session.clear();
    }

    /// Verify a password against the wallet and return the loaded wallet.
    ///
    /// While Unlocked the cached password is used and `password` is ignored.
    /// Otherwise `password` is used, falling back to the prompt.
    ///
    /// # Errors
    ///
    /// - `VaultError::WalletNotFound` if the file is gone
    /// - `VaultError::NotWellFormed` if the file is not a wallet
    /// - `VaultError::PasswordUnavailable` if the prompt cannot supply one
    /// - `VaultError::WrongMasterPassword` if the password does not open the canary
    pub fn unlock(&mut self, password: Option<&str>) -> Result<Unlocked> {
        let result = self.try_unlock(password);
        self.report(result)
    }

    /// Decrypt the value stored under `key`.
    ///
    /// Every entry's key token is decrypted in insertion order until one
    /// matches; the first match wins when a key was added more than once.
    pub fn get(&mut self, key: &str, password: Option<&str>) -> Result<String> {
        let result = self.try_get(key, password);
        self.report(result)
    }

    /// Encrypt and append a new entry, then rewrite the wallet.
    ///
    /// This never updates: adding an existing key stores a second entry.
    pub fn add(&mut self, key: &str, value: &str, password: Option<&str>) -> Result<()> {
        let result = self.try_add(key, value, password);
        self.report(result)
    }

    /// Plaintext names of all stored keys, each listed once, in insertion order.
    pub fn list_keys(&mut self, password: Option<&str>) -> Result<Vec<String>> {
        let result = self.try_list_keys(password);
        self.report(result)
    }

    fn init_wallet(&self, master_password: Option<&str>) -> Result<()> {
        if !self.path.exists() {
            self.events
                .record(&VaultEvent::WalletMissing { path: &self.path });

            let password = match master_password {
                Some(password) => Zeroizing::new(password.to_string()),
                None => match self.prompt.ask(PROMPT_MESSAGE) {
                    Ok(password) => Zeroizing::new(password),
                    Err(VaultError::PasswordUnavailable) => return Err(VaultError::WalletNotFound),
                    Err(err) => return Err(err),
                },
            };
            wallet::create_new(&self.path, &password)?;
            self.events
                .record(&VaultEvent::WalletCreated { path: &self.path });
        }

        wallet::load(&self.path)?;
        Ok(())
    }

    fn try_unlock(&mut self, password: Option<&str>) -> Result<Unlocked> {
        let wallet = wallet::load(&self.path)?;

        let candidate = match self.session.current(self.clock.now()) {
            Some(cached) => Zeroizing::new(cached.to_string()),
            None => match password {
                Some(password) => Zeroizing::new(password.to_string()),
                None => Zeroizing::new(self.prompt.ask(PROMPT_MESSAGE)?),
            },
        };

        let key = derive(&candidate);
        let verified = match decrypt(wallet.master(), &key) {
            Ok(canary) => Zeroizing::new(canary).as_str() == candidate.as_str(),
            Err(VaultError::WrongKeyOrTamperedData) => false,
            Err(err) => return Err(err),
        };
        if !verified {
            return Err(VaultError::WrongMasterPassword);
        }

        if self.session.remember(&candidate, self.clock.now()) {
            self.events.record(&VaultEvent::SessionCached {
                ttl: self.session.ttl(),
            });
        }

        Ok(Unlocked {
            password: candidate,
            key,
            wallet,
        })
    }

    fn try_get(&mut self, key: &str, password: Option<&str>) -> Result<String> {
        let unlocked = self.try_unlock(password)?;

        for (key_token, value_token) in unlocked.wallet.entries() {
            let name = Zeroizing::new(open_entry(key_token, &unlocked.key)?);
            if name.as_str() == key {
                return open_entry(value_token, &unlocked.key);
            }
        }

        Err(VaultError::KeyNotFound(key.to_string()))
    }

    fn try_add(&mut self, key: &str, value: &str, password: Option<&str>) -> Result<()> {
        let mut unlocked = self.try_unlock(password)?;

        let key_token = encrypt(key, &unlocked.key)?;
        let value_token = encrypt(value, &unlocked.key)?;
        unlocked.wallet.insert(key_token, value_token);

        wallet::save(&self.path, &unlocked.wallet)
    }

    fn try_list_keys(&mut self, password: Option<&str>) -> Result<Vec<String>> {
        let unlocked = self.try_unlock(password)?;

        let mut names = IndexSet::with_capacity(unlocked.wallet.len());
        for (key_token, _) in unlocked.wallet.entries() {
            names.insert(open_entry(key_token, &unlocked.key)?);
        }
        Ok(names.into_iter().collect())
    }

    fn report<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(error) = &result {
            self.events.record(&VaultEvent::Failure { error });
        }
        result
    }
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("path", &self.path)
            .field("session", &self.session)
            .finish()
    }
}

/// Decrypt one stored token under the unlocked key. An entry that fails to
/// authenticate means the password does not match this entry either.
fn open_entry(token: &EncryptedToken, key: &DerivedKey) -> Result<String> {
    decrypt(token, key).map_err(|err| match err {
        VaultError::WrongKeyOrTamperedData => VaultError::WrongMasterPassword,
        other => other,
    })
}
