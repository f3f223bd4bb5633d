use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub task_area: Rect,
    pub note_area: Rect,
    pub timer_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings and status (1 row)
/// - Task table (remaining space)
/// - Note table (30%)
/// - Timer bar (3 rows)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Keybindings bar
            Constraint::Min(8),         // Task table
            Constraint::Percentage(30), // Note table
            Constraint::Length(3),      // Timer bar
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        task_area: chunks[1],
        note_area: chunks[2],
        timer_area: chunks[3],
    }
}

/// A centered rect for overlay forms
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
