pub mod autocomplete;
pub mod form_view;
pub mod status_row;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: input box (3 rows) | selections | filler | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    form_view::render_input(frame, app, chunks[0]);
    form_view::render_selections(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[3]);

    // Dropdown floats over everything below the input box
    autocomplete::render_autocomplete(frame, app, chunks[0]);
}
