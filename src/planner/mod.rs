pub mod command;
pub mod error;
pub mod render;
pub mod session;
pub mod storage;
pub mod task;

pub use error::PlannerError;
pub use session::{Session, SessionState};
pub use storage::{Filter, Stats, Store, TASKS_FILE};
pub use task::{Priority, Task};
