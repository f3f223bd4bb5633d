use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Overdue task style
pub fn overdue_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Completed task style
pub fn completed_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Work phase gauge style
pub fn work_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Rest phase gauge style
pub fn rest_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Paused timer style
pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Border style for the focused pane
pub fn focused_border_style() -> Style {
    Style::default().fg(Color::LightCyan)
}

/// Status line style
pub fn status_style() -> Style {
    Style::default().fg(Color::Yellow)
}
