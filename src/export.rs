use crate::domain::{datefmt, EntityStore};
use anyhow::{Context, Result};
use std::path::Path;

/// Write tasks and notes as CSV rows `{Type, Title, Date, Category, Status}`.
/// Consumes only the store's read surface. Returns the number of data rows.
pub fn export_csv(store: &EntityStore, path: &Path) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;

    writer.write_record(["Type", "Title", "Date", "Category", "Status"])?;

    let mut rows = 0;
    for task in &store.tasks {
        let due = datefmt::format_minute(task.due_date);
        let status = if task.completed { "Done" } else { "Pending" };
        writer.write_record([
            "Task",
            task.title.as_str(),
            due.as_str(),
            task.category.as_str(),
            status,
        ])?;
        rows += 1;
    }
    for note in &store.notes {
        let date = datefmt::format_minute(note.date);
        writer.write_record([
            "Note",
            note.title(),
            date.as_str(),
            note.category.as_str(),
            "",
        ])?;
        rows += 1;
    }

    writer.flush().context("Failed to flush export file")?;
    Ok(rows)
}
