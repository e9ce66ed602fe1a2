use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::form::task_form::TaskForm;
use crate::model::{ProjectRecord, UserRecord};
use crate::ops::candidates::Corpus;
use crate::tui::app::App;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Three projects and three people.
pub fn sample_corpus() -> Corpus {
    Corpus::new(
        vec![
            ProjectRecord::new(1, "Optics"),
            ProjectRecord::new(2, "Optical Bench"),
            ProjectRecord::new(3, "Laser Rig"),
        ],
        vec![
            UserRecord::new(7, "John"),
            UserRecord::new(8, "Johanna"),
            UserRecord::new(9, "Ann"),
        ],
    )
}

/// An App around a fresh form over `corpus`.
pub fn app_with_corpus(corpus: Corpus) -> App {
    App::new(TaskForm::new(corpus))
}
