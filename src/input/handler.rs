use crate::app::{AppState, PaneFocus, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Search => handle_search_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_task_form_mode(app, key),
        UiMode::EditingComment => handle_comment_form_mode(app, key),
        UiMode::AddingNote | UiMode::EditingNote => handle_note_form_mode(app, key),
        UiMode::AddingCategory => handle_category_form_mode(app, key),
        UiMode::TimerSetup => handle_timer_form_mode(app, key),
        UiMode::FreeTimePrompt => handle_free_time_mode(app, key),
        UiMode::Stats => handle_stats_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        KeyCode::Tab => app.toggle_focus(),

        // Search
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc => {
            app.status = None;
            app.reset_search();
        }

        // Create / edit / delete in the focused pane
        KeyCode::Char('a') => match app.focus {
            PaneFocus::Tasks => app.open_task_form(false),
            PaneFocus::Notes => app.open_note_form(false),
        },
        KeyCode::Char('e') | KeyCode::Enter => match app.focus {
            PaneFocus::Tasks => app.open_task_form(true),
            PaneFocus::Notes => app.open_note_form(true),
        },
        KeyCode::Char('d') => app.delete_selected(),

        // Task flags and fields
        KeyCode::Char('c') => app.toggle_selected_completed(),
        KeyCode::Char('i') => app.toggle_selected_importance(),
        KeyCode::Char('u') => app.toggle_selected_urgency(),
        KeyCode::Char('m') => app.open_comment_form(),
        KeyCode::Char('z') => app.reset_selected_time(),

        // Categories and reminders
        KeyCode::Char('g') => app.open_category_form(),
        KeyCode::Char('r') => app.cycle_reminder_window(),

        // Timer session
        KeyCode::Char('t') => app.open_timer_setup(false),
        KeyCode::Char('T') => app.open_timer_setup(true),
        KeyCode::Char('p') => app.toggle_timer_pause(),
        KeyCode::Char('x') => app.stop_timer(),
        KeyCode::Char('f') => app.end_timer_early(),

        // Data management
        KeyCode::Char('s') => app.ui_mode = UiMode::Stats,
        KeyCode::Char('b') => app.restore_from_backup(),
        KeyCode::Char('o') => app.export_csv(),
        KeyCode::Char('w') => app.save(),

        _ => {}
    }
    Ok(false)
}

fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.apply_search(),
        KeyCode::Esc => {
            app.reset_search();
            app.ui_mode = UiMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => app.search_input.push(c),
        _ => {}
    }
    Ok(false)
}

fn handle_task_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_task_form(),
        KeyCode::Esc => app.cancel_task_form(),
        KeyCode::Tab => {
            if let Some(form) = &mut app.task_form {
                form.field = (form.field + 1) % 4;
            }
        }
        KeyCode::Left => {
            if let Some(form) = &mut app.task_form {
                if form.field == 2 && form.category_index > 0 {
                    form.category_index -= 1;
                }
            }
        }
        KeyCode::Right => {
            let count = app.store.categories.len();
            if let Some(form) = &mut app.task_form {
                if form.field == 2 && form.category_index + 1 < count {
                    form.category_index += 1;
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = &mut app.task_form {
                match form.field {
                    0 => {
                        form.title.pop();
                    }
                    1 => {
                        form.due_date.pop();
                    }
                    3 => {
                        form.comment.pop();
                    }
                    _ => {}
                }
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = &mut app.task_form {
                match form.field {
                    0 => form.title.push(c),
                    1 => form.due_date.push(c),
                    3 => form.comment.push(c),
                    _ => {}
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_comment_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_comment_form(),
        KeyCode::Esc => app.cancel_comment_form(),
        KeyCode::Backspace => {
            if let Some(form) = &mut app.comment_form {
                form.comment.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = &mut app.comment_form {
                form.comment.push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

/// Note text is multi-line: Enter inserts a newline while the text field is
/// active, and submits from the category field.
fn handle_note_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            let on_text = app.note_form.as_ref().map(|f| f.field == 0).unwrap_or(false);
            if on_text {
                if let Some(form) = &mut app.note_form {
                    form.text.push('\n');
                }
            } else {
                app.submit_note_form();
            }
        }
        KeyCode::Esc => app.cancel_note_form(),
        KeyCode::Tab => {
            if let Some(form) = &mut app.note_form {
                form.field = (form.field + 1) % 2;
            }
        }
        KeyCode::Left => {
            if let Some(form) = &mut app.note_form {
                if form.field == 1 && form.category_index > 0 {
                    form.category_index -= 1;
                }
            }
        }
        KeyCode::Right => {
            let count = app.store.categories.len();
            if let Some(form) = &mut app.note_form {
                if form.field == 1 && form.category_index + 1 < count {
                    form.category_index += 1;
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = &mut app.note_form {
                if form.field == 0 {
                    form.text.pop();
                }
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = &mut app.note_form {
                if form.field == 0 {
                    form.text.push(c);
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_category_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_category_form(),
        KeyCode::Esc => app.cancel_category_form(),
        KeyCode::Backspace => {
            if let Some(form) = &mut app.category_form {
                form.name.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = &mut app.category_form {
                form.name.push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_timer_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_timer_form(),
        KeyCode::Esc => app.cancel_timer_form(),
        KeyCode::Tab => {
            if let Some(form) = &mut app.timer_form {
                form.field = (form.field + 1) % 3;
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = &mut app.timer_form {
                match form.field {
                    0 => {
                        form.work.pop();
                    }
                    1 => {
                        form.rest.pop();
                    }
                    2 => {
                        form.long_break.pop();
                    }
                    _ => {}
                }
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(form) = &mut app.timer_form {
                match form.field {
                    0 => form.work.push(c),
                    1 => form.rest.push(c),
                    2 => form.long_break.push(c),
                    _ => {}
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_free_time_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_free_time_form(),
        KeyCode::Esc => app.cancel_free_time_form(),
        KeyCode::Backspace => {
            if let Some(form) = &mut app.free_time_form {
                form.description.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = &mut app.free_time_form {
                form.description.push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_stats_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('s') => {
            app.ui_mode = UiMode::Normal;
        }
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::now_minute;
    use crate::domain::EntityStore;
    use crate::persistence::AppConfig;
    use crossterm::event::{KeyEvent, KeyModifiers};

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

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_quit_key() {
        let (mut app, _dir) = test_app();
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_add_task_through_keys() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        for c in "Buy milk".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.store.tasks.len(), 1);
        assert_eq!(app.store.tasks[0].title, "Buy milk");
    }

    #[test]
    fn test_escape_cancels_form() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.store.tasks.is_empty());
    }

    #[test]
    fn test_focus_switch_routes_add_to_notes() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.ui_mode, UiMode::AddingNote);
    }

    #[test]
    fn test_search_flow() {
        let (mut app, _dir) = test_app();
        app.store.add_task("Alpha", now_minute(), "Work").unwrap();
        app.store.add_task("Beta", now_minute(), "Work").unwrap();
        app.refresh_visible();

        press(&mut app, KeyCode::Char('/'));
        for c in "alp".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.visible_tasks, vec![0]);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.visible_tasks.len(), 2);
    }

    #[test]
    fn test_timer_form_ignores_non_digits() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Char('T'));
        assert_eq!(app.ui_mode, UiMode::TimerSetup);

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.timer_form.as_ref().unwrap().work, "3");
    }

    #[test]
    fn test_note_form_enter_inserts_newline() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('a'));
        for c in "Title".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        for c in "body".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // Submit from the category field
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.notes.len(), 1);
        assert_eq!(app.store.notes[0].text, "Title\nbody");
        assert_eq!(app.store.notes[0].title(), "Title");
    }

    #[test]
    fn test_stats_mode_toggles() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.ui_mode, UiMode::Stats);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }
}
