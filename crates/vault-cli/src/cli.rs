use clap::{Args, Parser, Subcommand};

use vault_core::VERSION;

/// Vault - a local secret store protected by one master password
#[derive(Parser)]
#[command(name = "vault")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the wallet file
    #[arg(short, long, global = true, env = "VAULT_PATH")]
    pub wallet: Option<String>,

    /// Seconds to keep the master password cached in `shell` (0 disables)
    #[arg(long, global = true, value_name = "SECONDS")]
    pub ttl: Option<u64>,

    /// Never prompt; read the master password from VAULT_PASSWORD only
    #[arg(long, global = true)]
    pub no_input: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new wallet
    Init(InitArgs),

    /// Store a secret under a key
    Add(AddArgs),

    /// Print the secret stored under a key
    Get(GetArgs),

    /// List stored keys
    List,

    /// Run several commands against one unlocked wallet
    Shell,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the wallet will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Key to store the secret under
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Secret value (prompted for, or read from stdin, when omitted)
    #[arg(value_name = "VALUE")]
    pub value: Option<String>,
}

/// Arguments for the `get` command
#[derive(Args)]
pub struct GetArgs {
    /// Key to look up
    #[arg(value_name = "KEY")]
    pub key: String,
}
