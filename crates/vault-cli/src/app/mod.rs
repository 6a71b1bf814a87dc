//! Application-level utilities for the Vault CLI.
//!
//! This module provides:
//! - Path resolution for config and wallet files
//! - The shared command context
//! - The event sink the CLI hands to the vault

mod context;
mod events;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use events::CliEvents;
pub use resolver::resolve_config_path;
