use super::note::Note;
use super::task::{FreeTimeEntry, Task};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Category set seeded into every fresh store.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Uncategorized", "Work", "Personal", "Urgent"];

pub fn default_category() -> String {
    DEFAULT_CATEGORIES[0].to_string()
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

/// Rejected input; no state is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("note text must not be empty")]
    EmptyText,
    #[error("category name must not be empty")]
    EmptyCategory,
    #[error("category \"{0}\" already exists")]
    DuplicateCategory(String),
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD HH:MM")]
    InvalidDate(String),
}

/// In-memory collections of every record the planner owns.
///
/// The store is also the persisted snapshot: it serializes to the full
/// current schema and reads old snapshots tolerantly (absent collections
/// default, absent per-record fields default in the record types).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub free_time_entries: Vec<FreeTimeEntry>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            notes: Vec::new(),
            categories: default_categories(),
            free_time_entries: Vec::new(),
        }
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_title(title: &str) -> Result<String, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(title.to_string())
    }

    fn check_category(&self, category: &str) -> Result<String, ValidationError> {
        if !self.categories.iter().any(|c| c == category) {
            return Err(ValidationError::UnknownCategory(category.to_string()));
        }
        Ok(category.to_string())
    }

    /// Create a task. The category must be a member of the category set at
    /// creation time; the set shrinking later is not re-checked.
    pub fn add_task(
        &mut self,
        title: &str,
        due_date: NaiveDateTime,
        category: &str,
    ) -> Result<Uuid, ValidationError> {
        let title = Self::check_title(title)?;
        let category = self.check_category(category)?;
        let task = Task::new(title, due_date, category);
        let id = task.id;
        self.tasks.push(task);
        Ok(id)
    }

    pub fn update_task(
        &mut self,
        index: usize,
        title: &str,
        due_date: NaiveDateTime,
        category: &str,
        comment: &str,
        importance: bool,
        urgency: bool,
    ) -> Result<(), ValidationError> {
        let title = Self::check_title(title)?;
        let category = self.check_category(category)?;
        if let Some(task) = self.tasks.get_mut(index) {
            task.title = title;
            task.due_date = due_date;
            task.category = category;
            task.comment = comment.trim().to_string();
            task.importance = importance;
            task.urgency = urgency;
        }
        Ok(())
    }

    pub fn set_comment(&mut self, index: usize, comment: &str) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.comment = comment.trim().to_string();
        }
    }

    pub fn toggle_completed(&mut self, index: usize) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.completed = !task.completed;
        }
    }

    pub fn delete_task(&mut self, index: usize) -> Option<Task> {
        if index < self.tasks.len() {
            Some(self.tasks.remove(index))
        } else {
            None
        }
    }

    /// The explicit reset path; the only way `time_spent` ever decreases.
    pub fn reset_time_spent(&mut self, index: usize) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.time_spent = 0;
        }
    }

    /// Commit surface for the timer engine. Returns false if the task no
    /// longer exists (deleted mid-session), in which case nothing changes.
    pub fn credit_time(&mut self, id: Uuid, seconds: u64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.time_spent += seconds;
                true
            }
            None => false,
        }
    }

    /// Commit surface for unattributed work time.
    pub fn log_free_time(&mut self, description: String, seconds: u64, date: NaiveDateTime) {
        self.free_time_entries.push(FreeTimeEntry {
            date,
            description,
            time_spent: seconds,
        });
    }

    pub fn task_by_id(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// A note with empty text has no derivable title and is rejected.
    pub fn add_note(
        &mut self,
        text: &str,
        date: NaiveDateTime,
        category: &str,
    ) -> Result<(), ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let category = self.check_category(category)?;
        self.notes.push(Note::new(text.to_string(), date, category));
        Ok(())
    }

    pub fn edit_note(
        &mut self,
        index: usize,
        text: &str,
        category: &str,
    ) -> Result<(), ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let category = self.check_category(category)?;
        if let Some(note) = self.notes.get_mut(index) {
            note.text = text.to_string();
            note.category = category;
        }
        Ok(())
    }

    pub fn delete_note(&mut self, index: usize) -> Option<Note> {
        if index < self.notes.len() {
            Some(self.notes.remove(index))
        } else {
            None
        }
    }

    /// Append-only: categories are never removed through normal use.
    pub fn add_category(&mut self, name: &str) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if self.categories.iter().any(|c| c == name) {
            return Err(ValidationError::DuplicateCategory(name.to_string()));
        }
        self.categories.push(name.to_string());
        Ok(())
    }

    /// Case-insensitive substring match over title and category.
    pub fn search_tasks(&self, query: &str) -> Vec<usize> {
        let query = query.to_lowercase();
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| {
                t.title.to_lowercase().contains(&query)
                    || t.category.to_lowercase().contains(&query)
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Case-insensitive substring match over derived title, text, category.
    pub fn search_notes(&self, query: &str) -> Vec<usize> {
        let query = query.to_lowercase();
        self.notes
            .iter()
            .enumerate()
            .filter(|(_, n)| {
                n.title().to_lowercase().contains(&query)
                    || n.text.to_lowercase().contains(&query)
                    || n.category.to_lowercase().contains(&query)
            })
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::datefmt;
    use pretty_assertions::assert_eq;

    fn due() -> NaiveDateTime {
        datefmt::parse_minute("2025-06-10 14:00").unwrap()
    }

    fn store_with_task() -> (EntityStore, Uuid) {
        let mut store = EntityStore::new();
        let id = store.add_task("Write report", due(), "Work").unwrap();
        (store, id)
    }

    #[test]
    fn test_default_categories_seeded() {
        let store = EntityStore::new();
        assert_eq!(
            store.categories,
            vec!["Uncategorized", "Work", "Personal", "Urgent"]
        );
    }

    #[test]
    fn test_add_task_rejects_empty_title() {
        let mut store = EntityStore::new();
        assert_eq!(
            store.add_task("   ", due(), "Work"),
            Err(ValidationError::EmptyTitle)
        );
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn test_add_task_rejects_unknown_category() {
        let mut store = EntityStore::new();
        assert_eq!(
            store.add_task("T", due(), "Gardening"),
            Err(ValidationError::UnknownCategory("Gardening".to_string()))
        );
    }

    #[test]
    fn test_category_not_revalidated_after_set_changes() {
        // The store does not retroactively validate categories; a task keeps
        // its category string no matter what happens to the set later.
        let (store, id) = store_with_task();
        assert_eq!(store.task_by_id(id).unwrap().category, "Work");
    }

    #[test]
    fn test_credit_time_accumulates() {
        let (mut store, id) = store_with_task();
        assert!(store.credit_time(id, 60));
        assert!(store.credit_time(id, 30));
        assert_eq!(store.task_by_id(id).unwrap().time_spent, 90);
    }

    #[test]
    fn test_credit_time_missing_task() {
        let mut store = EntityStore::new();
        assert!(!store.credit_time(Uuid::new_v4(), 60));
    }

    #[test]
    fn test_reset_time_spent() {
        let (mut store, id) = store_with_task();
        store.credit_time(id, 120);
        store.reset_time_spent(0);
        assert_eq!(store.tasks[0].time_spent, 0);
    }

    #[test]
    fn test_add_note_rejects_empty_text() {
        let mut store = EntityStore::new();
        assert_eq!(
            store.add_note("  \n  ", due(), "Work"),
            Err(ValidationError::EmptyText)
        );
    }

    #[test]
    fn test_add_category_rejects_duplicate() {
        let mut store = EntityStore::new();
        assert_eq!(
            store.add_category("Work"),
            Err(ValidationError::DuplicateCategory("Work".to_string()))
        );
        store.add_category("Errands").unwrap();
        assert_eq!(store.categories.len(), 5);
        assert_eq!(
            store.add_category("Errands"),
            Err(ValidationError::DuplicateCategory("Errands".to_string()))
        );
    }

    #[test]
    fn test_add_category_rejects_empty() {
        let mut store = EntityStore::new();
        assert_eq!(store.add_category("  "), Err(ValidationError::EmptyCategory));
    }

    #[test]
    fn test_search_tasks() {
        let mut store = EntityStore::new();
        store.add_task("Write report", due(), "Work").unwrap();
        store.add_task("Buy groceries", due(), "Personal").unwrap();

        assert_eq!(store.search_tasks("report"), vec![0]);
        assert_eq!(store.search_tasks("PERSONAL"), vec![1]);
        assert_eq!(store.search_tasks("r"), vec![0, 1]);
        assert!(store.search_tasks("xyz").is_empty());
    }

    #[test]
    fn test_search_notes_matches_text() {
        let mut store = EntityStore::new();
        store.add_note("Meeting notes\ndiscuss roadmap", due(), "Work").unwrap();
        assert_eq!(store.search_notes("roadmap"), vec![0]);
        assert_eq!(store.search_notes("meeting"), vec![0]);
        assert!(store.search_notes("absent").is_empty());
    }

    #[test]
    fn test_delete_task_out_of_range() {
        let mut store = EntityStore::new();
        assert!(store.delete_task(0).is_none());
    }

    #[test]
    fn test_update_task() {
        let (mut store, _) = store_with_task();
        store
            .update_task(0, "Revised", due(), "Urgent", "see thread", true, false)
            .unwrap();
        let task = &store.tasks[0];
        assert_eq!(task.title, "Revised");
        assert_eq!(task.category, "Urgent");
        assert_eq!(task.comment, "see thread");
        assert!(task.importance);
        assert!(!task.urgency);
    }

    #[test]
    fn test_log_free_time() {
        let mut store = EntityStore::new();
        store.log_free_time("code review".to_string(), 300, due());
        assert_eq!(store.free_time_entries.len(), 1);
        assert_eq!(store.free_time_entries[0].time_spent, 300);
    }

    #[test]
    fn test_store_tolerant_read_empty_object() {
        let store: EntityStore = serde_json::from_str("{}").unwrap();
        assert!(store.tasks.is_empty());
        assert!(store.notes.is_empty());
        assert!(store.free_time_entries.is_empty());
        assert_eq!(
            store.categories,
            vec!["Uncategorized", "Work", "Personal", "Urgent"]
        );
    }
}
