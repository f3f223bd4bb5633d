use crate::app::AppState;
use crate::timer::Phase;
use crate::ui::styles::{border_style, default_style, paused_style, rest_style, work_style};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Gauge},
    Frame,
};

/// Render the timer bar: a gauge while a session runs, a hint otherwise
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(" Timer ");

    let Some(report) = &app.last_report else {
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(default_style())
            .ratio(0.0)
            .label("press t to start a session (T for free time)");
        f.render_widget(gauge, area);
        return;
    };

    let task_label = app
        .engine
        .as_ref()
        .and_then(|e| e.attributed())
        .and_then(|id| app.store.task_by_id(id))
        .map(|t| t.title.as_str())
        .unwrap_or("free time");

    let minutes = report.remaining / 60;
    let seconds = report.remaining % 60;
    let label = if report.paused {
        format!("Paused: {}", report.phase.label())
    } else {
        match report.phase {
            Phase::Work => format!(
                "Work on '{}': {}:{:02} (cycle {})",
                task_label,
                minutes,
                seconds,
                report.cycles_completed + 1
            ),
            Phase::Rest => format!(
                "Rest: {}:{:02} (cycle {})",
                minutes, seconds, report.cycles_completed
            ),
        }
    };

    let style = if report.paused {
        paused_style()
    } else {
        match report.phase {
            Phase::Work => work_style(),
            Phase::Rest => rest_style(),
        }
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(style)
        .ratio(report.progress.clamp(0.0, 1.0))
        .label(label);
    f.render_widget(gauge, area);
}
