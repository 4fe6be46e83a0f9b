/// Remote evaluation configuration command handlers
use anyhow::Result;
use focusgate_storage::{AiConfig, Database, API_KEY_ENV};

use super::helpers::mask_secret;

const KEYS: [&str; 6] = [
    "provider",
    "model",
    "api_key",
    "base_url",
    "enabled",
    "timeout_seconds",
];

pub fn handle_config_get(key: &str) -> Result<()> {
    let db = Database::new(None)?;
    let config = db.get_ai_config()?;
    match config_value(&config, key)? {
        Some(v) => println!("{key} = {v}"),
        None => println!("{key} is not set"),
    }
    Ok(())
}

pub fn handle_config_set(key: &str, value: &str) -> Result<()> {
    let db = Database::new(None)?;
    db.update_ai_config_field(key, Some(value))?;
    if key == "api_key" {
        println!("Set {key} = {}", mask_secret(value));
    } else {
        println!("Set {key} = {value}");
    }
    Ok(())
}

pub fn handle_config_unset(key: &str) -> Result<()> {
    if !matches!(key, "model" | "api_key" | "base_url") {
        anyhow::bail!("Only model, api_key and base_url can be unset");
    }
    let db = Database::new(None)?;
    db.update_ai_config_field(key, None)?;
    println!("Unset {key}");
    Ok(())
}

pub fn handle_config_list() -> Result<()> {
    let db = Database::new(None)?;
    let config = db.get_ai_config()?;

    println!("Remote evaluation:");
    for key in KEYS {
        let value = config_value(&config, key)?.unwrap_or_else(|| "(not set)".to_string());
        println!("  {key} = {value}");
    }
    if std::env::var(API_KEY_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        println!("\n{API_KEY_ENV} is set and overrides the stored api_key");
    }
    Ok(())
}

fn config_value(config: &AiConfig, key: &str) -> Result<Option<String>> {
    let value = match key {
        "provider" => Some(config.provider.to_string()),
        "model" => Some(config.effective_model().to_string()),
        "api_key" => config.api_key.as_deref().map(mask_secret),
        "base_url" => Some(config.effective_base_url().to_string()),
        "enabled" => Some(config.enabled.to_string()),
        "timeout_seconds" => Some(config.timeout_seconds.to_string()),
        _ => anyhow::bail!("Unknown key: {key}. Valid keys: {}", KEYS.join(", ")),
    };
    Ok(value)
}
