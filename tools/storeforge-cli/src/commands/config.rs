//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_file {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let cart = &ctx.config.cart;
    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output.kv("storage_key", &cart.storage_key);
    ctx.output.kv("currency", cart.currency.code());
    ctx.output
        .kv("max_quantity_per_item", &cart.max_quantity_per_item.to_string());
    ctx.output.kv("notifications", &cart.notifications.to_string());

    ctx.output.info("");
    ctx.output.info("[profile]");
    ctx.output.kv("name", &ctx.config.profile.name);
    ctx.output
        .kv("data_dir", &ctx.profile_dir().display().to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect `(errors, warnings)` for a configuration.
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.cart.storage_key.trim().is_empty() {
        errors.push("cart.storage_key is required".to_string());
    }

    if config.cart.max_quantity_per_item < 1 {
        errors.push("cart.max_quantity_per_item must be at least 1".to_string());
    }

    if config.profile.name.trim().is_empty() {
        errors.push("profile.name is required".to_string());
    } else if config.profile.name.contains(['/', '\\']) {
        errors.push("profile.name cannot contain path separators".to_string());
    }

    if !config.cart.notifications {
        warnings.push("cart.notifications is off; commands will run silently".to_string());
    }

    (errors, warnings)
}
