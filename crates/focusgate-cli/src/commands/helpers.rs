//! Helper utility functions for CLI commands

use focusgate_core::{config::SOCKET_FILE_NAME, ipc::IpcClient, Decision, Request};
use std::path::Path;

/// Tell a running daemon about a change. A missing daemon is not an error.
pub async fn notify_daemon(data_dir: &Path, request: Request) {
    let sock_path = data_dir.join(SOCKET_FILE_NAME);
    if !sock_path.exists() {
        log::debug!("Daemon not running, skipping {}", request.action());
        return;
    }
    let client = IpcClient::new(&sock_path);
    if let Err(e) = client.send(&request).await {
        log::warn!("Failed to notify daemon of {}: {e:#}", request.action());
    }
}

/// Show only the first few characters of a secret
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "***".to_string();
    }
    format!("{}***", secret.chars().take(4).collect::<String>())
}

pub fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

pub fn decision_label(decision: Decision) -> &'static str {
    match decision {
        Decision::Allowed => "allowed",
        Decision::Blocked => "blocked",
        Decision::Evaluate => "evaluate",
    }
}
