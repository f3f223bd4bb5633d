use crate::app::AppState;
use crate::domain::{datefmt, format_seconds};
use crate::ui::layout::centered_rect;
use crate::ui::styles::{border_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the timer statistics overlay: time per task plus the free-time log
pub fn render_stats_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled("Time by task", title_style())));
    let mut any = false;
    for task in &app.store.tasks {
        if task.time_spent > 0 {
            lines.push(Line::from(format!(
                "  {} — {}",
                task.title,
                format_seconds(task.time_spent)
            )));
            any = true;
        }
    }
    if !any {
        lines.push(Line::from("  no time tracked yet"));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Unplanned work", title_style())));
    if app.store.free_time_entries.is_empty() {
        lines.push(Line::from("  nothing logged"));
    }
    for entry in &app.store.free_time_entries {
        lines.push(Line::from(format!(
            "  {} | {} — {}",
            datefmt::format_minute(entry.date),
            entry.description,
            format_seconds(entry.time_spent)
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("esc close"));

    let height = (lines.len() as u16 + 2).min(area.height);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(" Timer statistics "),
    );
    let rect = centered_rect(70, height, area);
    f.render_widget(Clear, rect);
    f.render_widget(paragraph, rect);
}
