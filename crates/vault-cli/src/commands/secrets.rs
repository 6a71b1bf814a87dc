use std::time::Duration;

use zeroize::Zeroizing;

use crate::app::AppContext;
use crate::cli::{AddArgs, GetArgs};
use crate::prompt::read_secret_value;

// One-shot commands never cache the master password.
const ONE_SHOT_TTL: Duration = Duration::ZERO;

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let mut vault = ctx.open_vault(ONE_SHOT_TTL)?;

    let value = match args.value.as_deref() {
        Some(value) => Zeroizing::new(value.to_string()),
        None => read_secret_value(ctx.no_input())?,
    };
    vault.add(&args.key, &value, None)?;

    if !ctx.quiet() {
        println!("Added \"{}\"", args.key);
    }
    Ok(())
}

pub fn handle_get(ctx: &AppContext, args: &GetArgs) -> anyhow::Result<()> {
    let mut vault = ctx.open_vault(ONE_SHOT_TTL)?;
    let value = Zeroizing::new(vault.get(&args.key, None)?);
    println!("{}", value.as_str());
    Ok(())
}

pub fn handle_list(ctx: &AppContext) -> anyhow::Result<()> {
    let mut vault = ctx.open_vault(ONE_SHOT_TTL)?;
    let keys = vault.list_keys(None)?;

    if keys.is_empty() {
        if !ctx.quiet() {
            eprintln!("No keys stored yet.");
        }
        return Ok(());
    }
    for key in keys {
        println!("{}", key);
    }
    Ok(())
}
