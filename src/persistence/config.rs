use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_reminder_window() -> u32 {
    10
}

fn default_work_minutes() -> u32 {
    25
}

fn default_rest_minutes() -> u32 {
    5
}

fn default_long_break_minutes() -> u32 {
    15
}

/// Operator settings stored in config.json. Every field defaults when
/// absent so old config files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_reminder_window")]
    pub reminder_window_minutes: u32,
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_rest_minutes")]
    pub rest_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reminder_window_minutes: default_reminder_window(),
            work_minutes: default_work_minutes(),
            rest_minutes: default_rest_minutes(),
            long_break_minutes: default_long_break_minutes(),
        }
    }
}

/// Load config from config.json, defaulting when the file doesn't exist
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Save config to config.json
pub fn save_config<P: AsRef<Path>>(path: P, config: &AppConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    super::files::atomic_write(path, &json)?;
    Ok(())
}
