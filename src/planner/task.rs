use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::PlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(PlannerError::Validation(format!(
                "unknown priority '{}' (expected high, medium or low)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: String, description: &str, priority: Priority, due_date: Option<String>) -> Self {
        Self {
            id,
            description: description.trim().to_string(),
            completed: false,
            priority,
            due_date,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Flips completion, keeping `completed_at` set exactly while completed.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.completed_at = if self.completed { Some(Utc::now()) } else { None };
    }

    pub fn matches(&self, query_lower: &str) -> bool {
        self.description.to_lowercase().contains(query_lower)
    }
}
