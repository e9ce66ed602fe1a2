use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::selection::Selection;
use crate::tui::app::App;
use crate::util::unicode::caret_column;

/// Columns the input is scrolled left so the caret stays inside the box
pub(super) fn input_scroll(app: &App, inner_width: u16) -> usize {
    let col = caret_column(app.form.input(), app.form.caret());
    col.saturating_sub((inner_width as usize).saturating_sub(1))
}

/// The bordered one-line text input, with the terminal cursor at the caret
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.form.edit_task_id() {
        Some(id) => format!(" Edit task #{} ", id),
        None => " New task ".to_string(),
    };
    let border_color = if app.form.autocomplete().is_active() {
        app.theme.highlight
    } else {
        app.theme.dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border_color).bg(app.theme.background));
    let inner = block.inner(area);
    let scroll = input_scroll(app, inner.width);

    let paragraph = Paragraph::new(app.form.input())
        .style(Style::default().fg(app.theme.text_bright).bg(app.theme.background))
        .scroll((0, scroll as u16))
        .block(block);
    frame.render_widget(paragraph, area);

    if inner.width > 0 && inner.height > 0 {
        let col = caret_column(app.form.input(), app.form.caret()) - scroll;
        frame.set_cursor_position(Position::new(inner.x + col as u16, inner.y));
    }
}

/// `project: X  user: Y`, with `-` for an empty slot
pub fn render_selections(frame: &mut Frame, app: &App, area: Rect) {
    let label = Style::default().fg(app.theme.dim).bg(app.theme.background);
    let value = Style::default().fg(app.theme.text).bg(app.theme.background);

    let line = Line::from(vec![
        Span::styled(" project: ", label),
        Span::styled(selection_label(app.form.selected_project()), value),
        Span::styled("  user: ", label),
        Span::styled(selection_label(app.form.selected_user()), value),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn selection_label(selection: Option<&Selection>) -> String {
    selection.map_or_else(
        || "-".to_string(),
        |s| s.display_name.clone().unwrap_or_else(|| s.name.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn long_input_scrolls_to_caret() {
        let mut app = app_with_corpus(sample_corpus());
        app.form.set_input("0123456789abcdefghij", 20);
        let output = render_to_string(12, 3, |frame, area| render_input(frame, &app, area));
        let middle = output.lines().nth(1).unwrap_or_default();
        assert_eq!(middle, "│bcdefghij │");
    }

    #[test]
    fn short_input_does_not_scroll() {
        let mut app = app_with_corpus(sample_corpus());
        app.form.set_input("abc", 1);
        assert_eq!(input_scroll(&app, 10), 0);
    }

    #[test]
    fn selection_labels_prefer_display_name() {
        let mut s = Selection::new(1, "Optics");
        assert_eq!(selection_label(Some(&s)), "Optics");
        s.display_name = Some("Acme / Optics".into());
        assert_eq!(selection_label(Some(&s)), "Acme / Optics");
        assert_eq!(selection_label(None), "-");
    }
}
