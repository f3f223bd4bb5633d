use crate::app::AppState;
use crate::domain::format_seconds;
use crate::ui::layout::centered_rect;
use crate::ui::styles::{border_style, default_style, title_style};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn field_line<'a>(label: &'a str, value: String, active: bool) -> Line<'a> {
    let marker = if active { "> " } else { "  " };
    let value_style = if active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{:<12}", label), title_style()),
        Span::styled(value, value_style),
    ])
}

fn form_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(format!(" {} ", title))
}

fn render_overlay(f: &mut Frame, area: Rect, width: u16, height: u16, paragraph: Paragraph) {
    let rect = centered_rect(width, height, area);
    f.render_widget(Clear, rect);
    f.render_widget(paragraph, rect);
}

/// Render the add/edit task form
pub fn render_task_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.task_form else {
        return;
    };
    let category = app
        .store
        .categories
        .get(form.category_index)
        .cloned()
        .unwrap_or_default();

    let title = if form.editing_index.is_some() {
        "Edit task"
    } else {
        "New task"
    };
    let lines = vec![
        field_line("Title", form.title.clone(), form.field == 0),
        field_line("Due", form.due_date.clone(), form.field == 1),
        field_line("Category", format!("< {} >", category), form.field == 2),
        field_line("Comment", form.comment.clone(), form.field == 3),
        Line::from(""),
        Line::from("tab next field · enter save · esc cancel"),
    ];
    let paragraph = Paragraph::new(lines).block(form_block(title));
    render_overlay(f, area, 64, 8, paragraph);
}

/// Render the standalone comment editor
pub fn render_comment_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.comment_form else {
        return;
    };
    let lines = vec![
        field_line("Comment", form.comment.clone(), true),
        Line::from(""),
        Line::from("enter save · esc cancel"),
    ];
    let paragraph = Paragraph::new(lines)
        .block(form_block("Task comment"))
        .wrap(Wrap { trim: false });
    render_overlay(f, area, 64, 5, paragraph);
}

/// Render the add/edit note form
pub fn render_note_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.note_form else {
        return;
    };
    let category = app
        .store
        .categories
        .get(form.category_index)
        .cloned()
        .unwrap_or_default();

    let title = if form.editing_index.is_some() {
        "Edit note"
    } else {
        "New note (first line is the title)"
    };

    let mut lines = Vec::new();
    let text_marker = if form.field == 0 { "> " } else { "  " };
    lines.push(Line::from(vec![
        Span::raw(text_marker),
        Span::styled("Text", title_style()),
    ]));
    for text_line in form.text.split('\n') {
        lines.push(Line::from(format!("    {}", text_line)));
    }
    lines.push(Line::from(""));
    lines.push(field_line(
        "Category",
        format!("< {} >", category),
        form.field == 1,
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(
        "tab switch field · enter on category saves · esc cancel",
    ));

    let paragraph = Paragraph::new(lines).block(form_block(title));
    render_overlay(f, area, 64, 14, paragraph);
}

/// Render the new-category form
pub fn render_category_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.category_form else {
        return;
    };
    let lines = vec![
        field_line("Name", form.name.clone(), true),
        Line::from(""),
        Line::from("enter save · esc cancel"),
    ];
    let paragraph = Paragraph::new(lines).block(form_block("New category"));
    render_overlay(f, area, 44, 5, paragraph);
}

/// Render the timer setup form
pub fn render_timer_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.timer_form else {
        return;
    };
    let lines = vec![
        Line::from(Span::styled(
            format!("Session for: {}", form.task_label),
            default_style(),
        )),
        Line::from(""),
        field_line("Work (min)", form.work.clone(), form.field == 0),
        field_line("Rest (min)", form.rest.clone(), form.field == 1),
        field_line("Long (min)", form.long_break.clone(), form.field == 2),
        Line::from(""),
        Line::from("tab next field · enter start · esc cancel"),
    ];
    let paragraph = Paragraph::new(lines).block(form_block("Timer setup"));
    render_overlay(f, area, 48, 9, paragraph);
}

/// Render the free-time description prompt
pub fn render_free_time_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.free_time_form else {
        return;
    };
    let lines = vec![
        Line::from(format!("Worked {} with no task selected", format_seconds(form.seconds))),
        Line::from(""),
        field_line("Spent on", form.description.clone(), true),
        Line::from(""),
        Line::from("enter save · esc keep the session running"),
    ];
    let paragraph = Paragraph::new(lines).block(form_block("Log free time"));
    render_overlay(f, area, 56, 7, paragraph);
}

/// Render the search input bar
pub fn render_search_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let lines = vec![
        field_line("Search", app.search_input.clone(), true),
        Line::from(""),
        Line::from("enter apply · esc clear"),
    ];
    let paragraph = Paragraph::new(lines).block(form_block("Search tasks and notes"));
    render_overlay(f, area, 48, 5, paragraph);
}
