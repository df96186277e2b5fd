//! Tasks Module
//!
//! The task resource on top of the collection store.
//!
//! ## Responsibilities
//! - Validate task input (title and description are required)
//! - Generate ids and timestamps
//! - Turn "no record" into `NotFound`
//! - Bulk import from CSV

mod import;
mod model;
mod service;

pub use import::{import_csv, ImportReport};
pub use model::{NewTask, Task, TaskUpdate};
pub use service::TaskService;
