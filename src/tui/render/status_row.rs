use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Key hints, or the last notice when there is one
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    let line = match &app.message {
        Some(msg) => Line::from(Span::styled(
            format!(" {}", msg),
            Style::default().fg(app.theme.red).bg(bg),
        )),
        None => Line::from(Span::styled(
            hints(app),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn hints(app: &App) -> &'static str {
    if app.form.autocomplete().is_visible() {
        " \u{2191}\u{2193} choose  enter pick  esc close"
    } else if app.form.autocomplete().is_active() {
        " no matches  esc close"
    } else {
        " enter save  esc cancel"
    }
}
