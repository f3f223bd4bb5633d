use crate::app::{AppState, PaneFocus};
use crate::ui::styles::{
    border_style, default_style, focused_border_style, selected_style, title_style,
};
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// Render the note table
pub fn render_note_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let rows: Vec<Row> = app
        .visible_notes
        .iter()
        .enumerate()
        .map(|(row_index, &store_index)| {
            let note = &app.store.notes[store_index];
            let style = if app.focus == PaneFocus::Notes && row_index == app.note_selected {
                selected_style()
            } else {
                default_style()
            };

            Row::new(vec![
                Cell::from(note.title().to_string()),
                Cell::from(note.date.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(note.category.clone()),
            ])
            .style(style)
        })
        .collect();

    let border = if app.focus == PaneFocus::Notes {
        focused_border_style()
    } else {
        border_style()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Min(30),
            Constraint::Length(16),
            Constraint::Length(14),
        ],
    )
    .header(Row::new(vec!["Note", "Date", "Category"]).style(title_style()))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Notes "),
    );

    f.render_widget(table, area);
}
