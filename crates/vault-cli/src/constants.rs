//! Constants used throughout the CLI.

/// Default seconds a verified master password stays cached in `shell`.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 10;

/// Environment variable holding the master password for non-interactive use.
pub const PASSWORD_ENV: &str = "VAULT_PASSWORD";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "VAULT_CONFIG";

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error
/// - 2: Misuse of shell command (reserved by shells, used by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const GENERAL: i32 = 1;

    /// Resource not found (wallet, key).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong or missing master password).
    pub const AUTH_FAILED: i32 = 5;

    /// Wallet file exists but is not a well-formed wallet.
    pub const INTEGRITY_FAILED: i32 = 6;
}
