use super::files::atomic_write;
use crate::domain::EntityStore;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// What a legacy migration produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationSummary {
    pub tasks: usize,
    pub notes: usize,
}

/// One-shot upgrade from the pre-timer store formats.
///
/// Two legacy shapes are accepted: the very old bare task array
/// (`[{title, due_date, completed}]`) and the object form missing
/// `time_spent`/`free_time_entries`. Both are rewritten into the full
/// current schema with absent fields defaulted. This is the only supported
/// upgrade path; the result is written atomically to `output`.
pub fn migrate_legacy(input: &Path, output: &Path) -> Result<MigrationSummary> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read legacy store: {}", input.display()))?;

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Legacy store is not valid JSON: {}", input.display()))?;

    // A bare array is the oldest shape: tasks only, no surrounding object.
    let value = match value {
        Value::Array(tasks) => {
            let mut object = serde_json::Map::new();
            object.insert("tasks".to_string(), Value::Array(tasks));
            Value::Object(object)
        }
        other => other,
    };

    // The tolerant store read fills in every field the legacy shapes lack.
    let store: EntityStore = serde_json::from_value(value)
        .context("Legacy store does not match any supported schema")?;

    let json = serde_json::to_string_pretty(&store)?;
    atomic_write(output, &json)
        .with_context(|| format!("Failed to write migrated store: {}", output.display()))?;

    Ok(MigrationSummary {
        tasks: store.tasks.len(),
        notes: store.notes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_migrate_bare_array() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tasks_old.json");
        let output = dir.path().join("tasks.json");

        fs::write(
            &input,
            r#"[
                {"title": "Old one", "due_date": "2022-05-01 10:00", "completed": true},
                {"title": "Old two", "due_date": "2022-05-02 11:30"}
            ]"#,
        )
        .unwrap();

        let summary = migrate_legacy(&input, &output).unwrap();
        assert_eq!(summary, MigrationSummary { tasks: 2, notes: 0 });

        let migrated: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let tasks = migrated["tasks"].as_array().unwrap();
        assert_eq!(tasks[0]["title"], "Old one");
        assert_eq!(tasks[0]["completed"], true);
        assert_eq!(tasks[0]["category"], "Uncategorized");
        assert_eq!(tasks[0]["time_spent"], 0);
        assert_eq!(tasks[1]["completed"], false);
        assert_eq!(migrated["free_time_entries"], serde_json::json!([]));
        assert_eq!(migrated["categories"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_migrate_object_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tasks_old.json");
        let output = dir.path().join("tasks.json");

        fs::write(
            &input,
            r#"{
                "tasks": [
                    {"title": "Report", "due_date": "2023-01-10 09:00",
                     "category": "Work", "comment": "draft", "completed": false}
                ],
                "notes": [
                    {"text": "idea\nmore", "date": "2023-01-09 20:15", "category": "Personal"}
                ],
                "categories": ["Uncategorized", "Work", "Personal", "Urgent", "Custom"]
            }"#,
        )
        .unwrap();

        let summary = migrate_legacy(&input, &output).unwrap();
        assert_eq!(summary, MigrationSummary { tasks: 1, notes: 1 });

        let migrated: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let task = &migrated["tasks"][0];
        assert_eq!(task["time_spent"], 0);
        assert_eq!(task["importance"], false);
        assert_eq!(task["urgency"], false);
        assert_eq!(task["comment"], "draft");
        // Existing categories survive, including custom additions
        assert_eq!(migrated["categories"].as_array().unwrap().len(), 5);
        assert_eq!(migrated["free_time_entries"], serde_json::json!([]));
    }

    #[test]
    fn test_migrate_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(migrate_legacy(
            &dir.path().join("absent.json"),
            &dir.path().join("out.json")
        )
        .is_err());
    }

    #[test]
    fn test_migrate_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tasks_old.json");
        fs::write(&input, "not json at all").unwrap();
        assert!(migrate_legacy(&input, &dir.path().join("out.json")).is_err());
    }

    #[test]
    fn test_migrated_store_loads_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tasks_old.json");
        let output = dir.path().join("tasks.json");
        fs::write(
            &input,
            r#"[{"title": "Carry over", "due_date": "2021-11-11 11:11"}]"#,
        )
        .unwrap();

        migrate_legacy(&input, &output).unwrap();
        let store = crate::persistence::load(&output).unwrap();
        assert_eq!(store.tasks.len(), 1);
        assert_eq!(store.tasks[0].title, "Carry over");
    }
}
