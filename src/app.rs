use crate::domain::{datefmt, EntityStore};
use crate::export;
use crate::notifications;
use crate::persistence::{self, AppConfig};
use crate::reminders::{ReminderScanner, ReminderWindow};
use crate::timer::{Phase, TickReport, TimerEngine, TimerError};
use chrono::{Local, NaiveDateTime, Timelike};
use std::collections::HashSet;
use std::path::PathBuf;
use uuid::Uuid;

/// Current local time at minute precision (the granularity everything in
/// the store uses).
pub fn now_minute() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Search,
    AddingTask,
    EditingTask,
    EditingComment,
    AddingNote,
    EditingNote,
    AddingCategory,
    TimerSetup,
    FreeTimePrompt,
    Stats,
}

/// Which table the selection keys act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneFocus {
    Tasks,
    Notes,
}

/// Input form state for adding or editing a task
#[derive(Debug, Clone)]
pub struct TaskFormState {
    pub title: String,
    pub due_date: String,
    pub category_index: usize,
    pub comment: String,
    pub field: usize, // 0 = title, 1 = due date, 2 = category, 3 = comment
    /// Store index when editing, None when adding
    pub editing_index: Option<usize>,
}

/// Input form state for adding or editing a note
#[derive(Debug, Clone)]
pub struct NoteFormState {
    pub text: String,
    pub category_index: usize,
    pub field: usize, // 0 = text, 1 = category
    pub editing_index: Option<usize>,
}

/// Input form for a new category name
#[derive(Debug, Clone)]
pub struct CategoryFormState {
    pub name: String,
}

/// Editing an existing task's comment alone
#[derive(Debug, Clone)]
pub struct CommentFormState {
    pub comment: String,
    pub editing_index: usize,
}

/// Timer setup form (durations in minutes, as typed)
#[derive(Debug, Clone)]
pub struct TimerFormState {
    pub work: String,
    pub rest: String,
    pub long_break: String,
    pub field: usize, // 0 = work, 1 = rest, 2 = long break
    pub attributed: Option<Uuid>,
    pub task_label: String,
}

/// Description prompt shown when ending an untracked session with time on
/// the clock
#[derive(Debug, Clone)]
pub struct FreeTimeFormState {
    pub description: String,
    pub seconds: u64,
}

/// Main application state
pub struct AppState {
    pub store: EntityStore,
    pub config: AppConfig,
    pub engine: Option<TimerEngine>,
    pub last_report: Option<TickReport>,
    pub scanner: ReminderScanner,
    pub ui_mode: UiMode,
    pub focus: PaneFocus,
    /// Selections index into the visible lists, not the store
    pub task_selected: usize,
    pub note_selected: usize,
    pub search_input: String,
    pub active_query: Option<String>,
    pub visible_tasks: Vec<usize>,
    pub visible_notes: Vec<usize>,
    pub task_form: Option<TaskFormState>,
    pub note_form: Option<NoteFormState>,
    pub category_form: Option<CategoryFormState>,
    pub comment_form: Option<CommentFormState>,
    pub timer_form: Option<TimerFormState>,
    pub free_time_form: Option<FreeTimeFormState>,
    pub needs_save: bool,
    pub status: Option<String>,
    /// Reminders already surfaced this session, so the once-a-minute sweep
    /// doesn't re-notify (the scan itself stays idempotent)
    notified: HashSet<(String, NaiveDateTime)>,
    store_path: PathBuf,
    backup_path: PathBuf,
    config_path: PathBuf,
}

impl AppState {
    pub fn new(
        store: EntityStore,
        config: AppConfig,
        store_path: PathBuf,
        backup_path: PathBuf,
        config_path: PathBuf,
    ) -> Self {
        let window = ReminderWindow::from_minutes(config.reminder_window_minutes)
            .unwrap_or(ReminderWindow::Min10);
        let mut app = Self {
            store,
            config,
            engine: None,
            last_report: None,
            scanner: ReminderScanner::new(window),
            ui_mode: UiMode::Normal,
            focus: PaneFocus::Tasks,
            task_selected: 0,
            note_selected: 0,
            search_input: String::new(),
            active_query: None,
            visible_tasks: Vec::new(),
            visible_notes: Vec::new(),
            task_form: None,
            note_form: None,
            category_form: None,
            comment_form: None,
            timer_form: None,
            free_time_form: None,
            needs_save: false,
            status: None,
            notified: HashSet::new(),
            store_path,
            backup_path,
            config_path,
        };
        app.refresh_visible();
        app
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Recompute the visible index lists from the active search query and
    /// clamp selections
    pub fn refresh_visible(&mut self) {
        match &self.active_query {
            Some(query) => {
                self.visible_tasks = self.store.search_tasks(query);
                self.visible_notes = self.store.search_notes(query);
            }
            None => {
                self.visible_tasks = (0..self.store.tasks.len()).collect();
                self.visible_notes = (0..self.store.notes.len()).collect();
            }
        }
        if self.task_selected >= self.visible_tasks.len() {
            self.task_selected = self.visible_tasks.len().saturating_sub(1);
        }
        if self.note_selected >= self.visible_notes.len() {
            self.note_selected = self.visible_notes.len().saturating_sub(1);
        }
    }

    /// Store index of the selected task, if any
    pub fn selected_task(&self) -> Option<usize> {
        self.visible_tasks.get(self.task_selected).copied()
    }

    /// Store index of the selected note, if any
    pub fn selected_note(&self) -> Option<usize> {
        self.visible_notes.get(self.note_selected).copied()
    }

    pub fn move_selection_up(&mut self) {
        match self.focus {
            PaneFocus::Tasks => self.task_selected = self.task_selected.saturating_sub(1),
            PaneFocus::Notes => self.note_selected = self.note_selected.saturating_sub(1),
        }
    }

    pub fn move_selection_down(&mut self) {
        match self.focus {
            PaneFocus::Tasks => {
                if self.task_selected + 1 < self.visible_tasks.len() {
                    self.task_selected += 1;
                }
            }
            PaneFocus::Notes => {
                if self.note_selected + 1 < self.visible_notes.len() {
                    self.note_selected += 1;
                }
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PaneFocus::Tasks => PaneFocus::Notes,
            PaneFocus::Notes => PaneFocus::Tasks,
        };
    }

    // --- search ---

    pub fn start_search(&mut self) {
        self.search_input.clear();
        self.ui_mode = UiMode::Search;
    }

    pub fn apply_search(&mut self) {
        let query = self.search_input.trim().to_string();
        self.active_query = if query.is_empty() { None } else { Some(query) };
        self.ui_mode = UiMode::Normal;
        self.refresh_visible();
    }

    pub fn reset_search(&mut self) {
        self.search_input.clear();
        self.active_query = None;
        self.refresh_visible();
    }

    // --- one-second tick fan-out ---

    /// Drive the timer engine and the reminder scanner by one second
    pub fn on_tick(&mut self) {
        if let Some(engine) = &mut self.engine {
            let report = engine.tick(&mut self.store);
            if report.committed.is_some() {
                self.needs_save = true;
            }
            if report.switched_to == Some(Phase::Rest) {
                notifications::notify_work_phase_done(report.cycles_completed);
            }
            if report.running {
                self.last_report = Some(report);
            } else {
                self.engine = None;
                self.last_report = None;
            }
        }

        let now = now_minute();
        let window_minutes = self.scanner.window().minutes();
        let hits = self.scanner.on_tick(&self.store, now);
        for reminder in hits {
            if self.notified.insert((reminder.title.clone(), reminder.due)) {
                notifications::notify_task_due(&reminder.title, window_minutes);
                self.set_status(format!(
                    "Due soon: {} ({})",
                    reminder.title,
                    datefmt::format_minute(reminder.due)
                ));
            }
        }
    }

    pub fn cycle_reminder_window(&mut self) {
        let next = self.scanner.window().cycle();
        self.scanner.set_window(next);
        self.config.reminder_window_minutes = next.minutes();
        if let Err(e) = persistence::save_config(&self.config_path, &self.config) {
            tracing::warn!(error = %e, "failed to save config");
        }
        self.set_status(format!("Reminders fire {} minutes before due", next.minutes()));
    }

    // --- timer session ---

    /// Open the timer setup form, attributed to the selected task unless
    /// `untracked` is requested
    pub fn open_timer_setup(&mut self, untracked: bool) {
        if self.engine.is_some() {
            self.set_status("A timer session is already running");
            return;
        }
        let (attributed, task_label) = if untracked {
            (None, "free time".to_string())
        } else {
            match self.selected_task().and_then(|i| self.store.tasks.get(i)) {
                Some(task) => (Some(task.id), task.title.clone()),
                None => (None, "free time".to_string()),
            }
        };
        self.timer_form = Some(TimerFormState {
            work: self.config.work_minutes.to_string(),
            rest: self.config.rest_minutes.to_string(),
            long_break: self.config.long_break_minutes.to_string(),
            field: 0,
            attributed,
            task_label,
        });
        self.ui_mode = UiMode::TimerSetup;
    }

    pub fn submit_timer_form(&mut self) {
        let Some(form) = self.timer_form.take() else {
            return;
        };
        let parsed = (
            form.work.trim().parse::<u32>(),
            form.rest.trim().parse::<u32>(),
            form.long_break.trim().parse::<u32>(),
        );
        let (Ok(work), Ok(rest), Ok(long_break)) = parsed else {
            self.set_status("Enter positive whole minutes");
            self.timer_form = Some(form);
            return;
        };
        match TimerEngine::configure(work, rest, long_break, form.attributed) {
            Ok(engine) => {
                self.engine = Some(engine);
                self.last_report = None;
                self.config.work_minutes = work;
                self.config.rest_minutes = rest;
                self.config.long_break_minutes = long_break;
                if let Err(e) = persistence::save_config(&self.config_path, &self.config) {
                    tracing::warn!(error = %e, "failed to save config");
                }
                self.ui_mode = UiMode::Normal;
                self.set_status(format!("Timer started for {}", form.task_label));
            }
            Err(e) => {
                self.set_status(e.to_string());
                self.timer_form = Some(form);
            }
        }
    }

    pub fn cancel_timer_form(&mut self) {
        self.timer_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn toggle_timer_pause(&mut self) {
        if let Some(engine) = &mut self.engine {
            engine.toggle_pause();
        }
    }

    /// Cancel without saving: partial phase time is discarded on purpose
    pub fn stop_timer(&mut self) {
        if let Some(engine) = &mut self.engine {
            engine.stop();
            self.engine = None;
            self.last_report = None;
            self.set_status("Timer stopped, partial time discarded");
        }
    }

    /// End and save. Untracked sessions with accrued time need a
    /// description first, so this may detour through the prompt.
    pub fn end_timer_early(&mut self) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        if engine.needs_description() {
            self.free_time_form = Some(FreeTimeFormState {
                description: String::new(),
                seconds: engine.total_work_seconds(),
            });
            self.ui_mode = UiMode::FreeTimePrompt;
            return;
        }
        match engine.end_early(&mut self.store, None, now_minute()) {
            Ok(()) => {
                self.engine = None;
                self.last_report = None;
                self.needs_save = true;
                self.set_status("Session ended, time saved");
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn submit_free_time_form(&mut self) {
        let Some(form) = self.free_time_form.take() else {
            return;
        };
        let Some(engine) = &mut self.engine else {
            self.ui_mode = UiMode::Normal;
            return;
        };
        match engine.end_early(&mut self.store, Some(&form.description), now_minute()) {
            Ok(()) => {
                self.engine = None;
                self.last_report = None;
                self.needs_save = true;
                self.ui_mode = UiMode::Normal;
                self.set_status("Free time logged");
            }
            Err(TimerError::MissingDescription) => {
                self.set_status("Describe what the time was spent on");
                self.free_time_form = Some(form);
            }
            Err(e) => {
                self.set_status(e.to_string());
                self.free_time_form = Some(form);
            }
        }
    }

    /// Esc in the prompt: abort ending, the session keeps running
    pub fn cancel_free_time_form(&mut self) {
        self.free_time_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- task operations ---

    pub fn open_task_form(&mut self, edit: bool) {
        if edit {
            let Some(index) = self.selected_task() else {
                self.set_status("No task selected");
                return;
            };
            let task = &self.store.tasks[index];
            let category_index = self
                .store
                .categories
                .iter()
                .position(|c| c == &task.category)
                .unwrap_or(0);
            self.task_form = Some(TaskFormState {
                title: task.title.clone(),
                due_date: datefmt::format_minute(task.due_date),
                category_index,
                comment: task.comment.clone(),
                field: 0,
                editing_index: Some(index),
            });
            self.ui_mode = UiMode::EditingTask;
        } else {
            self.task_form = Some(TaskFormState {
                title: String::new(),
                due_date: datefmt::format_minute(now_minute()),
                category_index: 0,
                comment: String::new(),
                field: 0,
                editing_index: None,
            });
            self.ui_mode = UiMode::AddingTask;
        }
    }

    pub fn submit_task_form(&mut self) {
        let Some(form) = self.task_form.take() else {
            return;
        };
        let Some(due) = datefmt::parse_minute(&form.due_date) else {
            self.set_status(format!(
                "\"{}\" is not a valid date, expected YYYY-MM-DD HH:MM",
                form.due_date.trim()
            ));
            self.task_form = Some(form);
            return;
        };
        let category = self
            .store
            .categories
            .get(form.category_index)
            .cloned()
            .unwrap_or_else(crate::domain::store::default_category);

        let result = match form.editing_index {
            Some(index) => {
                let (importance, urgency) = self
                    .store
                    .tasks
                    .get(index)
                    .map(|t| (t.importance, t.urgency))
                    .unwrap_or((false, false));
                self.store.update_task(
                    index,
                    &form.title,
                    due,
                    &category,
                    &form.comment,
                    importance,
                    urgency,
                )
            }
            None => self
                .store
                .add_task(&form.title, due, &category)
                .map(|_| ()),
        };

        match result {
            Ok(()) => {
                self.ui_mode = UiMode::Normal;
                self.needs_save = true;
                self.refresh_visible();
            }
            Err(e) => {
                self.set_status(e.to_string());
                self.task_form = Some(form);
            }
        }
    }

    pub fn cancel_task_form(&mut self) {
        self.task_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn toggle_selected_completed(&mut self) {
        if let Some(index) = self.selected_task() {
            self.store.toggle_completed(index);
            self.needs_save = true;
        }
    }

    pub fn toggle_selected_importance(&mut self) {
        if let Some(index) = self.selected_task() {
            if let Some(task) = self.store.tasks.get_mut(index) {
                task.importance = !task.importance;
                self.needs_save = true;
            }
        }
    }

    pub fn toggle_selected_urgency(&mut self) {
        if let Some(index) = self.selected_task() {
            if let Some(task) = self.store.tasks.get_mut(index) {
                task.urgency = !task.urgency;
                self.needs_save = true;
            }
        }
    }

    pub fn delete_selected(&mut self) {
        match self.focus {
            PaneFocus::Tasks => {
                if let Some(index) = self.selected_task() {
                    self.store.delete_task(index);
                    self.needs_save = true;
                    self.refresh_visible();
                }
            }
            PaneFocus::Notes => {
                if let Some(index) = self.selected_note() {
                    self.store.delete_note(index);
                    self.needs_save = true;
                    self.refresh_visible();
                }
            }
        }
    }

    /// The explicit reset path for accumulated task time
    pub fn reset_selected_time(&mut self) {
        if let Some(index) = self.selected_task() {
            self.store.reset_time_spent(index);
            self.needs_save = true;
            self.set_status("Time spent reset");
        }
    }

    pub fn open_comment_form(&mut self) {
        let Some(index) = self.selected_task() else {
            self.set_status("No task selected");
            return;
        };
        self.comment_form = Some(CommentFormState {
            comment: self.store.tasks[index].comment.clone(),
            editing_index: index,
        });
        self.ui_mode = UiMode::EditingComment;
    }

    pub fn submit_comment_form(&mut self) {
        if let Some(form) = self.comment_form.take() {
            self.store.set_comment(form.editing_index, &form.comment);
            self.needs_save = true;
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_comment_form(&mut self) {
        self.comment_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- note operations ---

    pub fn open_note_form(&mut self, edit: bool) {
        if edit {
            let Some(index) = self.selected_note() else {
                self.set_status("No note selected");
                return;
            };
            let note = &self.store.notes[index];
            let category_index = self
                .store
                .categories
                .iter()
                .position(|c| c == &note.category)
                .unwrap_or(0);
            self.note_form = Some(NoteFormState {
                text: note.text.clone(),
                category_index,
                field: 0,
                editing_index: Some(index),
            });
            self.ui_mode = UiMode::EditingNote;
        } else {
            self.note_form = Some(NoteFormState {
                text: String::new(),
                category_index: 0,
                field: 0,
                editing_index: None,
            });
            self.ui_mode = UiMode::AddingNote;
        }
    }

    pub fn submit_note_form(&mut self) {
        let Some(form) = self.note_form.take() else {
            return;
        };
        let category = self
            .store
            .categories
            .get(form.category_index)
            .cloned()
            .unwrap_or_else(crate::domain::store::default_category);

        let result = match form.editing_index {
            Some(index) => self.store.edit_note(index, &form.text, &category),
            None => self.store.add_note(&form.text, now_minute(), &category),
        };

        match result {
            Ok(()) => {
                self.ui_mode = UiMode::Normal;
                self.needs_save = true;
                self.refresh_visible();
            }
            Err(e) => {
                self.set_status(e.to_string());
                self.note_form = Some(form);
            }
        }
    }

    pub fn cancel_note_form(&mut self) {
        self.note_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- categories ---

    pub fn open_category_form(&mut self) {
        self.category_form = Some(CategoryFormState {
            name: String::new(),
        });
        self.ui_mode = UiMode::AddingCategory;
    }

    pub fn submit_category_form(&mut self) {
        let Some(form) = self.category_form.take() else {
            return;
        };
        match self.store.add_category(&form.name) {
            Ok(()) => {
                self.ui_mode = UiMode::Normal;
                self.needs_save = true;
                self.set_status(format!("Added category \"{}\"", form.name.trim()));
            }
            Err(e) => {
                self.set_status(e.to_string());
                self.category_form = Some(form);
            }
        }
    }

    pub fn cancel_category_form(&mut self) {
        self.category_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- persistence ---

    /// Flush the snapshot. A failed write keeps the in-memory state (and
    /// the dirty flag) so nothing from the session is lost.
    pub fn save(&mut self) {
        match persistence::save(&self.store_path, &self.backup_path, &self.store) {
            Ok(()) => {
                self.needs_save = false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed, keeping in-memory state");
                self.set_status(format!("Save failed: {}", e));
            }
        }
    }

    pub fn restore_from_backup(&mut self) {
        match persistence::load_backup(&self.backup_path) {
            Ok(store) => {
                self.store = store;
                self.needs_save = true;
                self.refresh_visible();
                self.save();
                self.set_status("Data restored from backup");
            }
            Err(e) => self.set_status(format!("Restore failed: {}", e)),
        }
    }

    pub fn export_csv(&mut self) {
        let path = self
            .store_path
            .parent()
            .map(|dir| dir.join("planner_export.csv"))
            .unwrap_or_else(|| PathBuf::from("planner_export.csv"));
        match export::export_csv(&self.store, &path) {
            Ok(rows) => self.set_status(format!("Exported {} rows to {}", rows, path.display())),
            Err(e) => self.set_status(format!("Export failed: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let app = AppState::new(
            EntityStore::new(),
            AppConfig::default(),
            dir.path().join("tasks.json"),
            dir.path().join("tasks_backup.json"),
            dir.path().join("config.json"),
        );
        (app, dir)
    }

    fn due_soon() -> NaiveDateTime {
        now_minute() + chrono::Duration::minutes(3)
    }

    #[test]
    fn test_add_task_via_form() {
        let (mut app, _dir) = test_app();
        app.open_task_form(false);
        let form = app.task_form.as_mut().unwrap();
        form.title = "From form".to_string();
        app.submit_task_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.store.tasks.len(), 1);
        assert_eq!(app.store.tasks[0].category, "Uncategorized");
        assert!(app.needs_save);
    }

    #[test]
    fn test_task_form_rejects_empty_title() {
        let (mut app, _dir) = test_app();
        app.open_task_form(false);
        app.submit_task_form();

        // Form stays open, nothing created
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.task_form.is_some());
        assert!(app.store.tasks.is_empty());
        assert!(app.status.is_some());
    }

    #[test]
    fn test_task_form_rejects_bad_date() {
        let (mut app, _dir) = test_app();
        app.open_task_form(false);
        let form = app.task_form.as_mut().unwrap();
        form.title = "T".to_string();
        form.due_date = "tomorrow-ish".to_string();
        app.submit_task_form();

        assert!(app.store.tasks.is_empty());
        assert!(app.status.as_deref().unwrap().contains("not a valid date"));
    }

    #[test]
    fn test_search_filters_tasks() {
        let (mut app, _dir) = test_app();
        app.store.add_task("Alpha", due_soon(), "Work").unwrap();
        app.store.add_task("Beta", due_soon(), "Personal").unwrap();
        app.refresh_visible();

        app.start_search();
        app.search_input = "beta".to_string();
        app.apply_search();

        assert_eq!(app.visible_tasks, vec![1]);
        app.reset_search();
        assert_eq!(app.visible_tasks, vec![0, 1]);
    }

    #[test]
    fn test_timer_session_commits_into_selected_task() {
        let (mut app, _dir) = test_app();
        app.store.add_task("Focus", due_soon(), "Work").unwrap();
        app.refresh_visible();

        app.open_timer_setup(false);
        let form = app.timer_form.as_mut().unwrap();
        form.work = "1".to_string();
        form.rest = "1".to_string();
        form.long_break = "1".to_string();
        app.submit_timer_form();
        assert!(app.engine.is_some());

        for _ in 0..60 {
            app.on_tick();
        }
        assert_eq!(app.store.tasks[0].time_spent, 60);
        assert!(app.needs_save);
    }

    #[test]
    fn test_timer_form_rejects_non_numeric() {
        let (mut app, _dir) = test_app();
        app.open_timer_setup(true);
        let form = app.timer_form.as_mut().unwrap();
        form.work = "abc".to_string();
        app.submit_timer_form();

        assert!(app.engine.is_none());
        assert_eq!(app.ui_mode, UiMode::TimerSetup);
    }

    #[test]
    fn test_timer_form_rejects_zero() {
        let (mut app, _dir) = test_app();
        app.open_timer_setup(true);
        let form = app.timer_form.as_mut().unwrap();
        form.work = "0".to_string();
        app.submit_timer_form();

        assert!(app.engine.is_none());
        assert!(app.status.as_deref().unwrap().contains("positive"));
    }

    #[test]
    fn test_end_early_untracked_prompts_for_description() {
        let (mut app, _dir) = test_app();
        app.open_timer_setup(true);
        app.submit_timer_form();

        for _ in 0..30 {
            app.on_tick();
        }
        // Ending untracked time requires a description first
        app.end_timer_early();
        assert_eq!(app.ui_mode, UiMode::FreeTimePrompt);
        let form = app.free_time_form.as_mut().unwrap();
        assert_eq!(form.seconds, 30);
        form.description = "hallway chat".to_string();
        app.submit_free_time_form();

        assert!(app.engine.is_none());
        assert_eq!(app.store.free_time_entries.len(), 1);
        assert_eq!(app.store.free_time_entries[0].time_spent, 30);
    }

    #[test]
    fn test_stop_timer_discards_partial_time() {
        let (mut app, _dir) = test_app();
        app.store.add_task("Focus", due_soon(), "Work").unwrap();
        app.refresh_visible();
        app.open_timer_setup(false);
        app.submit_timer_form();

        for _ in 0..30 {
            app.on_tick();
        }
        app.stop_timer();
        assert!(app.engine.is_none());
        assert_eq!(app.store.tasks[0].time_spent, 0);
    }

    #[test]
    fn test_reminder_surfaces_once_per_session() {
        let (mut app, _dir) = test_app();
        app.store.add_task("Due task", due_soon(), "Work").unwrap();
        app.refresh_visible();

        for _ in 0..60 {
            app.on_tick();
        }
        assert!(app.status.as_deref().unwrap().starts_with("Due soon"));

        // Second sweep finds the same task but stays quiet
        app.status = None;
        for _ in 0..60 {
            app.on_tick();
        }
        assert!(app.status.is_none());
    }

    #[test]
    fn test_save_and_restore_from_backup() {
        let (mut app, _dir) = test_app();
        app.store.add_task("Keep me", due_soon(), "Work").unwrap();
        app.refresh_visible();
        app.save();
        assert!(!app.needs_save);

        // Age the primary, then save a second snapshot to rotate the first
        // into the backup slot
        let primary = app.store_path.clone();
        let old = std::time::SystemTime::now() - std::time::Duration::from_secs(60);
        let file = std::fs::OpenOptions::new().write(true).open(&primary).unwrap();
        file.set_modified(old).unwrap();
        drop(file);

        app.store.add_task("Second", due_soon(), "Work").unwrap();
        app.save();

        app.restore_from_backup();
        assert_eq!(app.store.tasks.len(), 1);
        assert_eq!(app.store.tasks[0].title, "Keep me");
    }

    #[test]
    fn test_delete_respects_focus() {
        let (mut app, _dir) = test_app();
        app.store.add_task("Task", due_soon(), "Work").unwrap();
        app.store.add_note("Note", now_minute(), "Work").unwrap();
        app.refresh_visible();

        app.focus = PaneFocus::Notes;
        app.delete_selected();
        assert_eq!(app.store.tasks.len(), 1);
        assert!(app.store.notes.is_empty());
    }

    #[test]
    fn test_category_form_duplicate_keeps_form_open() {
        let (mut app, _dir) = test_app();
        app.open_category_form();
        app.category_form.as_mut().unwrap().name = "Work".to_string();
        app.submit_category_form();

        assert_eq!(app.ui_mode, UiMode::AddingCategory);
        assert!(app.category_form.is_some());
        assert_eq!(app.store.categories.len(), 4);
    }
}
