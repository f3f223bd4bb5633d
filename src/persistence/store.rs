use super::files::{atomic_write, restore_primary_from_backup, rotate_backup};
use crate::domain::EntityStore;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but cannot be understood. Never fatal: the caller
    /// falls back to the backup, then to an empty snapshot.
    #[error("store file is corrupt: {0}")]
    CorruptData(String),
    /// The filesystem write failed; the primary has been restored from the
    /// pre-write backup where one existed.
    #[error("failed to write store")]
    WriteError(#[source] std::io::Error),
    /// No backup file exists - distinct from a backup that is corrupt.
    #[error("no backup file exists")]
    NoBackup,
}

/// Which source actually produced the loaded snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    Primary,
    Backup,
    Fresh,
}

/// Serialize the full snapshot to the primary store, rotating the previous
/// primary into the backup slot first (unless the backup is already newer).
///
/// On a failed write the primary is restored from the pre-write backup, so
/// from the caller's perspective the on-disk state is unchanged; the
/// in-memory snapshot is untouched either way.
pub fn save(primary: &Path, backup: &Path, store: &EntityStore) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(store)
        .map_err(|e| StoreError::WriteError(std::io::Error::other(e)))?;

    rotate_backup(primary, backup).map_err(StoreError::WriteError)?;

    if let Err(e) = atomic_write(primary, &json) {
        match restore_primary_from_backup(primary, backup) {
            Ok(true) => tracing::warn!("store write failed, primary restored from backup"),
            Ok(false) => tracing::warn!("store write failed, no backup to restore from"),
            Err(restore_err) => {
                tracing::error!(error = %restore_err, "store write failed and restore failed too")
            }
        }
        return Err(StoreError::WriteError(e));
    }

    Ok(())
}

/// Read the primary store. A missing or empty file is a fresh start, not an
/// error; only a present-but-malformed file surfaces `CorruptData`.
pub fn load(path: &Path) -> Result<EntityStore, StoreError> {
    if !path.exists() {
        return Ok(EntityStore::new());
    }
    let content =
        fs::read_to_string(path).map_err(|e| StoreError::CorruptData(e.to_string()))?;
    if content.trim().is_empty() {
        return Ok(EntityStore::new());
    }
    serde_json::from_str(&content).map_err(|e| StoreError::CorruptData(e.to_string()))
}

/// Same parsing contract as `load`, but an absent backup is `NoBackup`.
pub fn load_backup(path: &Path) -> Result<EntityStore, StoreError> {
    if !path.exists() {
        return Err(StoreError::NoBackup);
    }
    let content =
        fs::read_to_string(path).map_err(|e| StoreError::CorruptData(e.to_string()))?;
    if content.trim().is_empty() {
        return Ok(EntityStore::new());
    }
    serde_json::from_str(&content).map_err(|e| StoreError::CorruptData(e.to_string()))
}

/// Full recovery ladder: primary, then backup, then an empty snapshot.
/// Corruption is never fatal to the process.
pub fn load_or_recover(primary: &Path, backup: &Path) -> (EntityStore, Recovery) {
    match load(primary) {
        Ok(store) => (store, Recovery::Primary),
        Err(primary_err) => {
            tracing::warn!(error = %primary_err, "primary store unreadable, trying backup");
            match load_backup(backup) {
                Ok(store) => (store, Recovery::Backup),
                Err(backup_err) => {
                    tracing::warn!(error = %backup_err, "backup unusable, starting fresh");
                    (EntityStore::new(), Recovery::Fresh)
                }
            }
        }
    }
}
