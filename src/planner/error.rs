use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("could not parse task file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not read task file: {0}")]
    Unreadable(std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("no task with id '{id}'")]
    NotFound { id: String },

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
