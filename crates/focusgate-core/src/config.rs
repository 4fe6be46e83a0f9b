use anyhow::Result;
use std::path::PathBuf;

pub const SOCKET_FILE_NAME: &str = "focusgate.sock";

/// Get the local data directory for focusgate.
///
/// # Errors
///
/// Returns an error if the local data directory cannot be determined.
pub fn get_data_dir() -> Result<PathBuf> {
    let mut path =
        dirs::data_local_dir().ok_or_else(|| anyhow::anyhow!("Failed to get local data dir"))?;
    path.push("focusgate");
    Ok(path)
}

/// Socket the background daemon listens on
///
/// # Errors
///
/// Returns an error if the local data directory cannot be determined.
pub fn socket_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(SOCKET_FILE_NAME))
}
