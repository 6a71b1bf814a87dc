use std::path::Path;

use vault_core::Vault;

use crate::app::{resolve_config_path, AppContext, CliEvents};
use crate::cli::InitArgs;
use crate::config::{write_config, VaultConfig};
use crate::errors::CliError;
use crate::prompt::prompt_new_password;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let target = match args.path.as_deref() {
        Some(path) => Path::new(path).to_path_buf(),
        None => ctx.wallet_path()?,
    };

    if target.exists() {
        return Err(CliError::invalid_input(format!(
            "A file already exists at {}\nHint: Pass a different path or remove the existing file.",
            target.display()
        ))
        .into());
    }

    let password = prompt_new_password(ctx.no_input())?;

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
        })?;
    }

    Vault::builder(&target)
        .master_password(password.as_str())
        .events(CliEvents::new(true))
        .open()?;

    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        let ttl = ctx.cache_ttl()?.as_secs();
        write_config(&config_path, &VaultConfig::new(&target, ttl))?;
        tracing::info!(path = %config_path.display(), "wrote config");
    }

    if !ctx.quiet() {
        println!("Initialized new wallet at {}", target.display());
    }
    Ok(())
}
