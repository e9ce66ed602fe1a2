use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::form_view::input_scroll;
use crate::tui::app::App;
use crate::util::unicode::{caret_column, display_width, truncate_to_width};

/// Maximum number of visible entries in the dropdown
const MAX_VISIBLE: usize = 8;

/// First entry shown so the highlighted one stays in a window of `rows`
fn scroll_start(highlighted: Option<usize>, rows: usize) -> usize {
    match highlighted {
        Some(i) if rows > 0 && i >= rows => i - rows + 1,
        _ => 0,
    }
}

/// Render the candidate dropdown under the tag being typed
pub fn render_autocomplete(frame: &mut Frame, app: &App, edit_area: Rect) {
    let ac = app.form.autocomplete();
    let Some(tag) = ac.tag() else {
        return;
    };
    if !ac.is_visible() {
        return;
    }

    let bg = app.theme.background;
    let accent = app.theme.tag_color(tag.kind);
    let candidates = ac.candidates();
    let count = candidates.len().min(MAX_VISIBLE);

    // Borders plus the three-cell marker column
    let max_width = candidates
        .iter()
        .map(|c| display_width(&c.name))
        .max()
        .unwrap_or(10)
        + 5;

    let popup_w = (max_width as u16)
        .min(edit_area.width.saturating_sub(2))
        .max(12);
    let popup_h = (count as u16) + 2;

    // Below the input when it fits, otherwise above
    let term_area = frame.area();
    let y = if edit_area.y + edit_area.height + popup_h <= term_area.height {
        edit_area.y + edit_area.height
    } else {
        edit_area.y.saturating_sub(popup_h)
    };

    // Line up with the sigil in the scrolled input
    let input = app.form.input();
    let scroll = input_scroll(app, edit_area.width.saturating_sub(2));
    let tag_col = caret_column(input, tag.start()).saturating_sub(scroll);
    let x = (edit_area.x + 1 + tag_col as u16).min(term_area.width.saturating_sub(popup_w));

    // Small terminals clip the popup rather than draw past the buffer
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(term_area);
    if popup_area.is_empty() {
        return;
    }
    let label_width = (popup_area.width as usize).saturating_sub(5);
    let rows = (popup_area.height.saturating_sub(2) as usize).min(MAX_VISIBLE);
    let start = scroll_start(ac.highlighted(), rows);

    let mut lines: Vec<Line> = Vec::new();
    for (i, entry) in candidates.iter().enumerate().skip(start).take(rows) {
        let is_selected = ac.highlighted() == Some(i);

        let style = if is_selected {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };

        let prefix = if is_selected { " \u{25B8} " } else { "   " };
        let name = truncate_to_width(&entry.name, label_width);
        let pad = label_width.saturating_sub(display_width(&name));
        let label = format!("{}{}", name, " ".repeat(pad));

        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(label, style),
        ]));
    }

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);
}
