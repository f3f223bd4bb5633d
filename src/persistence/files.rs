use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the data directory - checks for a local .focal first, then falls back
/// to the global ~/.focal
pub fn get_data_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".focal"))
}

/// Find a local .focal directory by walking up the directory tree
fn find_local_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let data_dir = current.join(".focal");
        if data_dir.exists() && data_dir.is_dir() {
            return Some(data_dir);
        }
        current = current.parent()?;
    }
}

/// Ensure the data directory exists
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = get_data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .focal directory in the current directory
pub fn init_local_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let data_dir = current_dir.join(".focal");

    if data_dir.exists() {
        anyhow::bail!("Data directory already exists: {}", data_dir.display());
    }

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create directory: {}", data_dir.display()))?;

    Ok(data_dir)
}

/// Path to the primary store file
pub fn store_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("tasks.json"))
}

/// Path to the rotating backup of the primary store
pub fn backup_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("tasks_backup.json"))
}

/// Path to config.json (reminder window, timer defaults)
pub fn config_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("config.json"))
}

/// Path to the session log file (the TUI cannot log to stderr)
pub fn log_file() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("focal.log"))
}

/// Atomically write content to a file using temp file + rename.
/// The handle is released on every exit path, including failure.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> std::io::Result<()> {
    let path = path.as_ref();
    let dir = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "file path has no parent")
    })?;

    // Create temp file in the same directory so the rename stays on one
    // filesystem
    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Rotate the primary into the backup slot before an overwrite.
///
/// Skipped when there is no primary yet, and when the backup is already as
/// new as the primary (equal mtimes count as newer - coarse filesystem
/// clocks must not clobber a fresher backup). Returns whether a copy was
/// made.
pub fn rotate_backup(primary: &Path, backup: &Path) -> std::io::Result<bool> {
    if !primary.exists() {
        return Ok(false);
    }
    if backup.exists() {
        let primary_mtime = fs::metadata(primary)?.modified()?;
        let backup_mtime = fs::metadata(backup)?.modified()?;
        if backup_mtime >= primary_mtime {
            return Ok(false);
        }
    }
    fs::copy(primary, backup)?;
    Ok(true)
}

/// Put the pre-write backup back over a primary that failed to write.
pub fn restore_primary_from_backup(primary: &Path, backup: &Path) -> std::io::Result<bool> {
    if !backup.exists() {
        return Ok(false);
    }
    fs::copy(backup, primary)?;
    Ok(true)
}
