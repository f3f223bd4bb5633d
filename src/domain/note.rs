use super::datefmt;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A free-form note. The title is derived from the text, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    #[serde(with = "datefmt::minute")]
    pub date: NaiveDateTime,
    #[serde(default = "super::store::default_category")]
    pub category: String,
}

impl Note {
    pub fn new(text: String, date: NaiveDateTime, category: String) -> Self {
        Self { text, date, category }
    }

    /// First non-empty line of the text, trimmed.
    pub fn title(&self) -> &str {
        self.text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
    }
}
