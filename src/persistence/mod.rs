pub mod config;
pub mod files;
pub mod migration;
pub mod store;

pub use config::{load_config, save_config, AppConfig};
pub use files::{
    atomic_write, backup_file, config_file, ensure_data_dir, get_data_dir, init_local_dir,
    log_file, restore_primary_from_backup, rotate_backup, store_file,
};
pub use migration::{migrate_legacy, MigrationSummary};
pub use store::{load, load_backup, load_or_recover, save, Recovery, StoreError};
