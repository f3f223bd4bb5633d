use crate::app::AppState;
use crate::ui::styles::{default_style, status_style};
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

const HELP: &str =
    "q quit  tab pane  / search  a add  e edit  d del  c done  i/u flags  m comment  t timer  p pause  x stop  f finish  s stats  g category  r reminders  b restore  o export";

/// One-line help bar; a pending status message takes its place until
/// dismissed with Esc
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let paragraph = match &app.status {
        Some(status) => Paragraph::new(Line::from(status.clone())).style(status_style()),
        None => Paragraph::new(Line::from(HELP)).style(default_style()),
    };
    f.render_widget(paragraph, area);
}
