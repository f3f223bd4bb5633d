pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod note_pane;
pub mod stats_pane;
pub mod styles;
pub mod task_pane;
pub mod timer_pane;

use crate::app::{AppState, UiMode};
use input_form::{
    render_category_form, render_comment_form, render_free_time_form, render_note_form,
    render_search_bar, render_task_form, render_timer_form,
};
use keybindings::render_keybindings;
use layout::create_layout;
use note_pane::render_note_pane;
use ratatui::Frame;
use stats_pane::render_stats_pane;
use task_pane::render_task_pane;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &mut AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app, layout.keybindings_area);
    render_task_pane(f, app, layout.task_area);
    render_note_pane(f, app, layout.note_area);
    render_timer_pane(f, app, layout.timer_area);

    // Overlays on top of the base panes
    match app.ui_mode {
        UiMode::Search => render_search_bar(f, app, size),
        UiMode::AddingTask | UiMode::EditingTask => render_task_form(f, app, size),
        UiMode::EditingComment => render_comment_form(f, app, size),
        UiMode::AddingNote | UiMode::EditingNote => render_note_form(f, app, size),
        UiMode::AddingCategory => render_category_form(f, app, size),
        UiMode::TimerSetup => render_timer_form(f, app, size),
        UiMode::FreeTimePrompt => render_free_time_form(f, app, size),
        UiMode::Stats => render_stats_pane(f, app, size),
        UiMode::Normal => {}
    }
}
