//! Unix socket transport for the message protocol: one JSON request per
//! connection, answered with one JSON response or nothing.


use anyhow::{Context, Result};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{UnixListener, UnixStream},
};

use crate::background::BackgroundHandle;
use crate::protocol::{Request, Response};

const MAX_REQUEST_BYTES: u64 = 1024 * 1024;

#[derive(Debug)]
pub struct IpcClient {
    sock_path: PathBuf,
}

impl IpcClient {
    #[must_use]
    pub fn new(sock_path: &Path) -> Self {
        Self {
            sock_path: sock_path.to_path_buf(),
        }
    }

    /// Send one request. Notifications come back as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon is unreachable or replies with
    /// something that is not a response.
    pub async fn send(&self, request: &Request) -> Result<Option<Response>> {
        let mut stream = UnixStream::connect(&self.sock_path)
            .await
            .with_context(|| format!("Failed to connect to {}", self.sock_path.display()))?;

        let encoded = serde_json::to_vec(request)?;
        stream.write_all(&encoded).await?;
        stream.shutdown().await?;

        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer).await?;
        if buffer.is_empty() {
            return Ok(None);
        }
        let response = serde_json::from_slice::<Response>(&buffer)
            .context("Daemon sent a malformed response")?;
        Ok(Some(response))
    }
}

/// Bind the socket, replacing a stale one left by a previous run.
///
/// # Errors
///
/// Returns an error if the stale socket cannot be removed or binding fails.
pub fn bind(sock_path: &Path) -> io::Result<UnixListener> {
    if sock_path.exists() {
        fs::remove_file(sock_path)?;
    }
    UnixListener::bind(sock_path)
}

/// Accept connections forever, forwarding each request to the background.
pub async fn serve(listener: UnixListener, handle: BackgroundHandle) {
    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let handle = handle.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, &handle).await {
                        log::error!("IPC connection error: {e:#}");
                    }
                });
            }
            Err(e) => {
                log::error!("IPC accept error: {e}");
            }
        }
    }
}

async fn handle_connection(mut stream: UnixStream, handle: &BackgroundHandle) -> Result<()> {
    let mut buffer = Vec::new();
    (&mut stream)
        .take(MAX_REQUEST_BYTES)
        .read_to_end(&mut buffer)
        .await
        .context("IPC read failed")?;
    if buffer.is_empty() {
        return Ok(());
    }

    let request = match serde_json::from_slice::<Request>(&buffer) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Ignoring malformed IPC request: {e}");
            return Ok(());
        }
    };

    if let Some(response) = handle.request(request).await {
        let encoded = serde_json::to_vec(&response)?;
        stream.write_all(&encoded).await?;
    }
    stream.shutdown().await?;
    Ok(())
}
