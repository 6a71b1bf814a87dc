//! Password and secret input.
//!
//! The master password comes from `VAULT_PASSWORD` when set, otherwise from
//! a hidden dialoguer prompt when stdin is a terminal.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use vault_core::{PasswordPrompt, VaultError};
use zeroize::Zeroizing;

use crate::constants::PASSWORD_ENV;

/// Master-password source for the vault.
pub struct TerminalPrompt {
    interactive: bool,
}

impl TerminalPrompt {
    pub fn new(no_input: bool) -> Self {
        Self {
            interactive: std::io::stdin().is_terminal() && !no_input,
        }
    }
}

impl PasswordPrompt for TerminalPrompt {
    fn ask(&self, message: &str) -> vault_core::Result<String> {
        if let Some(value) = password_from_env() {
            return Ok(value);
        }
        if !self.interactive {
            return Err(VaultError::PasswordUnavailable);
        }
        Password::new()
            .with_prompt(message)
            .interact()
            .map_err(|e| VaultError::Io {
                source: io::Error::new(io::ErrorKind::Other, e.to_string()),
            })
    }
}

/// Prompt for a new master password with confirmation (for init).
pub fn prompt_new_password(no_input: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = password_from_env() {
        return Ok(Zeroizing::new(value));
    }
    if no_input || !std::io::stdin().is_terminal() {
        return Err(VaultError::PasswordUnavailable.into());
    }
    Password::new()
        .with_prompt("New master password")
        .with_confirmation("Confirm master password", "Passwords do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Read a secret value: hidden prompt on a terminal, otherwise all of stdin.
pub fn read_secret_value(no_input: bool) -> anyhow::Result<Zeroizing<String>> {
    if !no_input && std::io::stdin().is_terminal() {
        return Password::new()
            .with_prompt("Value")
            .allow_empty_password(true)
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| anyhow::anyhow!("Failed to read value: {}", e));
    }
    let mut buffer = Zeroizing::new(String::new());
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read value from stdin: {}", e))?;
    Ok(Zeroizing::new(trim_line_ending(&buffer).to_string()))
}

fn password_from_env() -> Option<String> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|value| !value.is_empty())
}

pub fn trim_line_ending(value: &str) -> &str {
    value
        .strip_suffix("\r\n")
        .or_else(|| value.strip_suffix('\n'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_password_from_env_is_kept() {
        // Only this test touches the variable in this process.
        std::env::set_var(PASSWORD_ENV, "  ");
        assert_eq!(password_from_env().as_deref(), Some("  "));
        std::env::set_var(PASSWORD_ENV, "");
        assert_eq!(password_from_env(), None);
        std::env::remove_var(PASSWORD_ENV);
        assert_eq!(password_from_env(), None);
    }

    #[test]
    fn test_trim_line_ending() {
        assert_eq!(trim_line_ending("secret\n"), "secret");
        assert_eq!(trim_line_ending("secret\r\n"), "secret");
        assert_eq!(trim_line_ending("secret"), "secret");
        assert_eq!(trim_line_ending("two\nlines\n"), "two\nlines");
    }
}
