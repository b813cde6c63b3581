use super::error::{PlannerError, Result};
use super::task::{Priority, Task};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

pub const TASKS_FILE: &str = "todos.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Pending,
    Completed,
    Priority(Priority),
}

impl Filter {
    /// Unrecognized names fall back to `All`.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "pending" => Filter::Pending,
            "completed" => Filter::Completed,
            "high" => Filter::Priority(Priority::High),
            "medium" => Filter::Priority(Priority::Medium),
            "low" => Filter::Priority(Priority::Low),
            _ => Filter::All,
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.completed,
            Filter::Completed => task.completed,
            Filter::Priority(p) => task.priority == *p,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub high_priority_pending: usize,
    /// Percentage rounded to one decimal; `None` for an empty list.
    pub completion_rate: Option<f64>,
}

/// Owns the task list and keeps `path` in sync with it.
///
/// Every mutation rewrites the whole file. A failed write leaves the
/// in-memory change in place and is kept until [`Store::take_error`].
pub struct Store {
    path: PathBuf,
    tasks: Vec<Task>,
    last_id: u64,
    pending_error: Option<PlannerError>,
}

fn read_tasks(path: &Path) -> Result<Vec<Task>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let bytes = fs::read(path).map_err(PlannerError::Unreadable)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    // invalid UTF-8 surfaces as a parse error here
    Ok(serde_json::from_slice(&bytes)?)
}

impl Store {
    /// Loads `path`; a missing file gives an empty list, an unreadable one
    /// is reported and discarded.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let (tasks, pending_error) = match read_tasks(&path) {
            Ok(tasks) => {
                debug!("loaded {} tasks from {}", tasks.len(), path.display());
                (tasks, None)
            }
            Err(e) => {
                warn!("{}: {}; starting with an empty task list", path.display(), e);
                (Vec::new(), Some(e))
            }
        };

        let last_id = tasks
            .iter()
            .filter_map(|t| t.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            path,
            tasks,
            last_id,
            pending_error,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the most recent load or save failure, if any, clearing it.
    pub fn take_error(&mut self) -> Option<PlannerError> {
        self.pending_error.take()
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.tasks)
            .map_err(|e| PlannerError::Io(e.into()))?;
        fs::write(&self.path, json)?;
        debug!("saved {} tasks to {}", self.tasks.len(), self.path.display());
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            error!("failed to save {}: {}", self.path.display(), e);
            self.pending_error = Some(e);
        }
    }

    /// Millisecond timestamp, bumped past anything already issued or stored.
    ///
    /// Once a stored id has reached `u64::MAX` ids stay unique but are no
    /// longer increasing.
    fn next_id(&mut self) -> Result<String> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let mut candidate = match self.last_id.checked_add(1) {
            Some(floor) => now.max(floor),
            None => now,
        };
        while self.tasks.iter().any(|t| t.id == candidate.to_string()) {
            candidate = candidate
                .checked_add(1)
                .ok_or_else(|| PlannerError::Validation("no free task id left".to_string()))?;
        }
        self.last_id = self.last_id.max(candidate);
        Ok(candidate.to_string())
    }

    pub fn add(&mut self, description: &str, priority: Priority, due_date: Option<String>) -> Result<Task> {
        if description.trim().is_empty() {
            return Err(PlannerError::Validation(
                "task description cannot be empty".to_string(),
            ));
        }

        let id = self.next_id()?;
        let task = Task::new(id, description, priority, due_date);
        self.tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    pub fn list(&self, filter: Filter) -> impl Iterator<Item = &Task> + Clone + '_ {
        self.tasks.iter().filter(move |t| filter.matches(t))
    }

    pub fn toggle_complete(&mut self, id: &str) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| PlannerError::NotFound { id: id.to_string() })?;

        task.toggle();
        let updated = task.clone();
        self.persist();
        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| PlannerError::NotFound { id: id.to_string() })?;

        let removed = self.tasks.remove(index);
        self.persist();
        Ok(removed)
    }

    /// Case-insensitive substring search; an empty query matches everything.
    pub fn search(&self, query: &str) -> impl Iterator<Item = &Task> + Clone + '_ {
        let query = query.to_lowercase();
        self.tasks.iter().filter(move |t| t.matches(&query))
    }

    pub fn stats(&self) -> Stats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let high_priority_pending = self
            .tasks
            .iter()
            .filter(|t| !t.completed && t.priority == Priority::High)
            .count();

        let completion_rate = if total == 0 {
            None
        } else {
            Some((completed as f64 * 1000.0 / total as f64).round() / 10.0)
        };

        Stats {
            total,
            completed,
            pending: total - completed,
            high_priority_pending,
            completion_rate,
        }
    }
}
