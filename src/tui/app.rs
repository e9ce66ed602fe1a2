use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::form::task_form::{Submission, TaskForm};

use super::input;
use super::render;
use super::theme::Theme;

/// Interactive task-entry screen
pub struct App {
    pub form: TaskForm,
    pub theme: Theme,
    pub should_quit: bool,
    /// Set when the form was submitted; `None` on quit means cancelled
    pub submission: Option<Submission>,
    /// One-line notice shown in the status row
    pub message: Option<String>,
}

impl App {
    pub fn new(form: TaskForm) -> Self {
        App {
            form,
            theme: Theme::default(),
            should_quit: false,
            submission: None,
            message: None,
        }
    }

    /// Submit the form, or leave an error in the status row
    pub fn submit(&mut self) {
        match self.form.submit() {
            Ok(submission) => {
                log::debug!("form submitted: {:?}", submission);
                self.submission = Some(submission);
                self.should_quit = true;
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    pub fn cancel(&mut self) {
        self.submission = None;
        self.should_quit = true;
    }
}

/// Run the task form until it is submitted or cancelled
pub fn run(form: TaskForm) -> Result<Option<Submission>, Box<dyn std::error::Error>> {
    let mut app = App::new(form);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal before the panic message prints
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map(|()| app.submission)
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
