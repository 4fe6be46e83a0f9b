use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::{
    background::BackgroundService,
    ipc::{bind, serve},
};

/// Long-running background context reachable over the local socket
pub struct Daemon {
    service: BackgroundService,
    sock_path: PathBuf,
}

impl Daemon {
    #[must_use]
    pub fn new(service: BackgroundService, sock_path: PathBuf) -> Self {
        Self { service, sock_path }
    }

    /// Run until Ctrl-C, then remove the socket.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound or the signal handler
    /// cannot be installed.
    pub async fn run_with_signals(self) -> Result<()> {
        let Self { service, sock_path } = self;

        service.on_installed();
        service.on_startup();

        if let Some(parent) = sock_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let listener = bind(&sock_path)
            .with_context(|| format!("Failed to bind {}", sock_path.display()))?;

        let handle = service.spawn();
        let server = tokio::spawn(serve(listener, handle));
        log::info!("Daemon listening on {}", sock_path.display());

        let signal = tokio::signal::ctrl_c().await;
        server.abort();
        if sock_path.exists() {
            if let Err(e) = fs::remove_file(&sock_path) {
                log::warn!("Failed to remove socket {}: {e}", sock_path.display());
            }
        }
        signal.context("Failed to listen for Ctrl-C")?;

        log::info!("Daemon shut down gracefully.");
        Ok(())
    }
}
