use crate::app::{now_minute, AppState, PaneFocus};
use crate::domain::format_seconds;
use crate::ui::styles::{
    border_style, completed_style, default_style, focused_border_style, overdue_style,
    selected_style, title_style,
};
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// Render the task table
pub fn render_task_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let now = now_minute();

    let rows: Vec<Row> = app
        .visible_tasks
        .iter()
        .enumerate()
        .map(|(row_index, &store_index)| {
            let task = &app.store.tasks[store_index];
            let status = if task.completed { "✓" } else { "✗" };
            let comment_marker = if task.comment.trim().is_empty() { "" } else { "✓" };
            let time = if task.time_spent > 0 {
                format_seconds(task.time_spent)
            } else {
                String::new()
            };

            let style = if app.focus == PaneFocus::Tasks && row_index == app.task_selected {
                selected_style()
            } else if task.is_overdue(now) {
                overdue_style()
            } else if task.completed {
                completed_style()
            } else {
                default_style()
            };

            Row::new(vec![
                Cell::from(task.title.clone()),
                Cell::from(task.due_date.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(task.category.clone()),
                Cell::from(task.priority().badge()),
                Cell::from(status),
                Cell::from(comment_marker),
                Cell::from(time),
            ])
            .style(style)
        })
        .collect();

    let border = if app.focus == PaneFocus::Tasks {
        focused_border_style()
    } else {
        border_style()
    };

    let title = match &app.active_query {
        Some(query) => format!(" Tasks (filter: {}) ", query),
        None => " Tasks ".to_string(),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Task", "Due", "Category", "Pri", "St", "Cm", "Time"])
            .style(title_style()),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );

    f.render_widget(table, area);
}
