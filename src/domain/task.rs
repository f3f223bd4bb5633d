use super::datefmt;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Priority quadrant derived from the importance/urgency flags.
///
/// Variants are ordered ascending so that `Ord` ranks
/// (important, urgent) above (important) above (urgent) above neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Neither,
    UrgentOnly,
    ImportantOnly,
    ImportantUrgent,
}

impl Priority {
    pub fn from_flags(importance: bool, urgency: bool) -> Self {
        match (importance, urgency) {
            (true, true) => Priority::ImportantUrgent,
            (true, false) => Priority::ImportantOnly,
            (false, true) => Priority::UrgentOnly,
            (false, false) => Priority::Neither,
        }
    }

    /// Two-character badge for table rendering.
    pub fn badge(&self) -> &'static str {
        match self {
            Priority::ImportantUrgent => "!!",
            Priority::ImportantOnly => "! ",
            Priority::UrgentOnly => " !",
            Priority::Neither => "  ",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::ImportantUrgent => "important & urgent",
            Priority::ImportantOnly => "important",
            Priority::UrgentOnly => "urgent",
            Priority::Neither => "normal",
        }
    }
}

/// A unit of work with a due date.
///
/// Serialized field order matches the store schema. Fields added after the
/// initial release (`category`, `comment`, `time_spent`, `importance`,
/// `urgency`) default when absent so older snapshots remain loadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Runtime identity for timer attribution; regenerated on load.
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(with = "datefmt::minute")]
    pub due_date: NaiveDateTime,
    #[serde(default = "super::store::default_category")]
    pub category: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub importance: bool,
    #[serde(default)]
    pub urgency: bool,
}

impl Task {
    pub fn new(title: String, due_date: NaiveDateTime, category: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            due_date,
            category,
            comment: String::new(),
            time_spent: 0,
            completed: false,
            importance: false,
            urgency: false,
        }
    }

    pub fn priority(&self) -> Priority {
        Priority::from_flags(self.importance, self.urgency)
    }

    /// An incomplete task past its due date.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.completed && self.due_date < now
    }
}

/// Work time logged with no task selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeTimeEntry {
    #[serde(with = "datefmt::minute")]
    pub date: NaiveDateTime,
    pub description: String,
    pub time_spent: u64,
}

/// Format accumulated seconds as "Xm Ys" (just "Ys" under a minute).
pub fn format_seconds(secs: u64) -> String {
    let minutes = secs / 60;
    let seconds = secs % 60;
    if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
