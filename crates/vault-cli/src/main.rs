//! Vault CLI - a local secret store protected by one master password
//!
//! This is the command-line interface for Vault. It wires terminal prompts,
//! config, and logging around the core library.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod prompt;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vault_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{init, secrets, shell};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        CliError::from_anyhow(&e).exit();
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Add(args)) => {
            secrets::handle_add(ctx, args)?;
        }
        Some(Commands::Get(args)) => {
            secrets::handle_get(ctx, args)?;
        }
        Some(Commands::List) => {
            secrets::handle_list(ctx)?;
        }
        Some(Commands::Shell) => {
            shell::handle_shell(ctx)?;
        }
        None => print_quickstart(),
    }
    Ok(())
}

fn print_quickstart() {
    println!("Vault {}", VERSION);
    println!();
    println!("Quickstart:");
    println!("  vault init                 Create a wallet");
    println!("  vault add email a@b.com    Store a secret");
    println!("  vault get email            Print it back");
    println!("  vault list                 List stored keys");
    println!("  vault shell                Keep the wallet open for several commands");
    println!();
    println!("Run `vault --help` for all options.");
}
