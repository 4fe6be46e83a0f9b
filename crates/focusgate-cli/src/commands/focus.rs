/// Global switch and status command handlers
use anyhow::Result;
use focusgate_core::{config::SOCKET_FILE_NAME, ipc::IpcClient, Request, Response};
use focusgate_storage::{Database, StateStore};
use std::path::Path;

use super::helpers::{notify_daemon, on_off};

/// Set focus mode, or flip it when `focus_mode` is `None`
pub async fn set_focus_mode(data_dir: &Path, focus_mode: Option<bool>) -> Result<()> {
    let db = Database::new(None)?;
    let current = db.load()?.focus_mode;
    let focus_mode = focus_mode.unwrap_or(!current);

    db.set_focus_mode(focus_mode)?;
    println!("Focus mode: {}", on_off(focus_mode));

    notify_daemon(data_dir, Request::FocusModeChanged { focus_mode }).await;
    Ok(())
}

pub async fn show_status(data_dir: &Path) -> Result<()> {
    let db = Database::new(None)?;
    let state = db.load()?;
    let ai_config = db.get_ai_config()?;

    println!("Focus mode: {}", on_off(state.focus_mode));
    if state.focus_areas.is_empty() {
        println!("Focus areas: none");
    } else {
        println!("Focus areas: {}", state.focus_areas.as_slice().join(", "));
    }
    println!("Site overrides: {}", state.site_toggles.len());

    let remote = if !ai_config.enabled {
        "disabled".to_string()
    } else if ai_config.effective_api_key().is_none() {
        "no API key (keyword fallback only)".to_string()
    } else {
        format!("{} ({})", ai_config.provider, ai_config.effective_model())
    };
    println!("Remote evaluation: {remote}");

    let sock_path = data_dir.join(SOCKET_FILE_NAME);
    if !sock_path.exists() {
        println!("Daemon: not running");
        return Ok(());
    }

    let client = IpcClient::new(&sock_path);
    match client.send(&Request::GetFocusMode).await {
        Ok(Some(Response::FocusMode { focus_mode })) => {
            println!("Daemon: running (sees focus mode {})", on_off(focus_mode));
        }
        Ok(_) => anyhow::bail!("Unexpected response from daemon"),
        Err(e) => {
            log::error!("Failed to reach daemon: {e:#}");
            println!("Daemon: not running (or not responding)");
        }
    }
    Ok(())
}
