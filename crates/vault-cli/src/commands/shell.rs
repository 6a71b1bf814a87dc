//! `vault shell`: a line-oriented session over one wallet.
//!
//! This is where the session ttl matters: after one successful unlock,
//! further commands reuse the cached master password until it expires.

use std::io::{self, IsTerminal, Write};

use vault_core::Vault;
use zeroize::Zeroizing;

use crate::app::AppContext;
use crate::errors::CliError;
use crate::prompt::trim_line_ending;

const HELP: &str = "\
Commands:
  get KEY          Print the secret stored under KEY
  add KEY VALUE    Store VALUE under KEY (the rest of the line is the value)
  list             List stored keys
  lock             Forget the cached master password
  status           Show whether the master password is cached
  help             Show this help
  quit             Leave the shell";

/// One parsed shell line.
#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Get(String),
    Add { key: String, value: String },
    List,
    Lock,
    Status,
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
///
/// Only the line ending is stripped from an `add` value; any other
/// whitespace in it is part of the secret.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, CliError> {
    let line = trim_line_ending(line).trim_start();
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = split_word(line);
    let command = match verb {
        "get" => {
            let (key, extra) = split_word(rest.trim());
            if key.is_empty() || !extra.is_empty() {
                return Err(CliError::invalid_input("Usage: get KEY"));
            }
            ShellCommand::Get(key.to_string())
        }
        "add" => {
            let (key, value) = split_word(rest.trim_start());
            if key.is_empty() || value.is_empty() {
                return Err(CliError::invalid_input("Usage: add KEY VALUE"));
            }
            ShellCommand::Add {
                key: key.to_string(),
                value: value.to_string(),
            }
        }
        "list" | "ls" => ShellCommand::List,
        "lock" => ShellCommand::Lock,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => {
            return Err(CliError::invalid_input(format!(
                "Unknown command: {}\nHint: Type `help` to see available commands.",
                other
            )))
        }
    };
    Ok(Some(command))
}

/// Split off the first word and the single separator after it.
fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (input, ""),
    }
}

pub fn handle_shell(ctx: &AppContext) -> anyhow::Result<()> {
    let mut vault = ctx.open_vault(ctx.cache_ttl()?)?;
    let interactive = io::stdin().is_terminal() && !ctx.no_input();

    if interactive && !ctx.quiet() {
        println!(
            "Wallet {}. Type `help` for commands.",
            vault.path().display()
        );
    }

    loop {
        if interactive {
            print!("vault> ");
            io::stdout().flush()?;
        }

        let mut line = Zeroizing::new(String::new());
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_line(&line) {
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("Error: {}", err);
                continue;
            }
        };

        if let Err(err) = run_command(&mut vault, command, ctx.quiet()) {
            eprintln!("Error: {}", CliError::from_vault(&err));
        }
    }

    vault.lock();
    Ok(())
}

fn run_command(vault: &mut Vault, command: ShellCommand, quiet: bool) -> vault_core::Result<()> {
    match command {
        ShellCommand::Get(key) => {
            let value = Zeroizing::new(vault.get(&key, None)?);
            println!("{}", value.as_str());
        }
        ShellCommand::Add { key, value } => {
            let value = Zeroizing::new(value);
            vault.add(&key, &value, None)?;
            if !quiet {
                println!("Added \"{}\"", key);
            }
        }
        ShellCommand::List => {
            for key in vault.list_keys(None)? {
                println!("{}", key);
            }
        }
        ShellCommand::Lock => {
            vault.lock();
            if !quiet {
                println!("Locked.");
            }
        }
        ShellCommand::Status => {
            let state = if vault.is_unlocked() {
                "unlocked"
            } else {
                "locked"
            };
            println!("{} (ttl {}s)", state, vault.ttl().as_secs());
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => {}
    }
    Ok(())
}
