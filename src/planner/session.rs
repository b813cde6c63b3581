use super::command::Command;
use super::error::PlannerError;
use super::render;
use super::storage::{Filter, Store};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

/// Read-eval loop over a borrowed [`Store`].
///
/// Command failures are reported on `err` and never end the session; only
/// `quit`/`exit` or end of input does. The returned `io::Error`s come from
/// the terminal streams themselves.
pub struct Session<'a, R, W, E> {
    store: &'a mut Store,
    input: R,
    out: W,
    err: E,
    state: SessionState,
}

impl<'a, R: BufRead, W: Write, E: Write> Session<'a, R, W, E> {
    pub fn new(store: &'a mut Store, input: R, out: W, err: E) -> Self {
        Self {
            store,
            input,
            out,
            err,
            state: SessionState::Running,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn run(&mut self) -> io::Result<()> {
        render::welcome(&mut self.out)?;
        self.report_store_error()?;

        let mut line = String::new();
        while self.state == SessionState::Running {
            render::prompt(&mut self.out)?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                render::goodbye(&mut self.out)?;
                self.state = SessionState::Terminated;
                break;
            }

            self.execute(&line)?;
        }

        Ok(())
    }

    /// Handles a single input line.
    pub fn execute(&mut self, line: &str) -> io::Result<()> {
        match Command::parse(line) {
            Ok(None) => {}
            Ok(Some(command)) => self.dispatch(command)?,
            Err(e) => self.report(e)?,
        }
        self.report_store_error()
    }

    fn dispatch(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Add {
                description,
                priority,
                due_date,
            } => match self.store.add(&description, priority, due_date) {
                Ok(task) => render::task_added(&mut self.out, &task),
                Err(e) => self.report(e),
            },
            Command::List { filter } => {
                let note = if self.store.tasks().is_empty() {
                    "No todos found.".to_string()
                } else {
                    "No todos found for this filter.".to_string()
                };
                let title = match filter {
                    Filter::All => "📋 Todo List".to_string(),
                    Filter::Pending => "📋 Pending Todos".to_string(),
                    Filter::Completed => "📋 Completed Todos".to_string(),
                    Filter::Priority(p) => format!("📋 {} Priority Todos", p.as_str().to_uppercase()),
                };
                render::task_list(&mut self.out, &title, self.store.list(filter), &note)
            }
            Command::Complete { id } => match self.store.toggle_complete(&id) {
                Ok(task) => render::task_toggled(&mut self.out, &task),
                Err(e) => self.report(e),
            },
            Command::Delete { id } => match self.store.delete(&id) {
                Ok(task) => render::task_deleted(&mut self.out, &task),
                Err(e) => self.report(e),
            },
            Command::Search { query } => render::task_list(
                &mut self.out,
                &format!("🔍 Search Results for \"{}\"", query),
                self.store.search(&query),
                &format!("No todos found matching: {}", query),
            ),
            Command::Stats => render::stats(&mut self.out, &self.store.stats()),
            Command::Help => render::help(&mut self.out),
            Command::Clear => render::clear_screen(&mut self.out),
            Command::Quit => {
                self.state = SessionState::Terminated;
                render::goodbye(&mut self.out)
            }
        }
    }

    fn report(&mut self, error: PlannerError) -> io::Result<()> {
        render::error(&mut self.err, &error)?;
        if matches!(error, PlannerError::UnknownCommand(_)) {
            writeln!(self.err, "Type 'help' for available commands.")?;
        }
        Ok(())
    }

    fn report_store_error(&mut self) -> io::Result<()> {
        match self.store.take_error() {
            Some(e @ (PlannerError::Parse(_) | PlannerError::Unreadable(_))) => render::warning(
                &mut self.err,
                format!(
                    "{} is malformed or unreadable ({}); starting with an empty list",
                    self.store.path().display(),
                    e
                ),
            ),
            Some(e) => render::warning(&mut self.err, format!("changes may not be saved: {}", e)),
            None => Ok(()),
        }
    }
}
