//! Task Service
//!
//! Validates task input and maps task operations onto the `tasks` collection.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use crate::error::{Result, StoreError};
use crate::store::{Database, Filter, MatchMode};

use super::model::{required, NewTask, Task, TaskUpdate};

/// Cloneable handle on the task collection
///
/// Every operation holds the database lock for its whole
/// select → mutate → persist cycle, so operations never interleave.
#[derive(Clone)]
pub struct TaskService {
    db: Arc<Mutex<Database>>,
}

impl TaskService {
    /// Collection holding the tasks
    pub const COLLECTION: &'static str = "tasks";

    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Create a task
    ///
    /// Fails with `Validation` when title or description is missing or blank.
    pub fn create(&self, input: NewTask) -> Result<Task> {
        let title = required(input.title)
            .ok_or_else(|| StoreError::Validation("Title is required".to_string()))?;
        let description = required(input.description)
            .ok_or_else(|| StoreError::Validation("Description is required".to_string()))?;

        let task = Task::create(title, description, Utc::now());
        let record = task.to_record()?;

        self.db.lock().insert(Self::COLLECTION, record)?;

        tracing::info!(id = %task.id, "Task created");
        Ok(task)
    }

    /// List tasks in creation order
    ///
    /// With a search term, only tasks whose title or description contains it.
    pub fn list(&self, search: Option<&str>) -> Result<Vec<Task>> {
        let filter = search.filter(|term| !term.is_empty()).map(|term| {
            Filter::new()
                .field("title", term)
                .field("description", term)
                .mode(MatchMode::Any)
        });

        let records = self.db.lock().select(Self::COLLECTION, filter.as_ref());
        records.into_iter().map(Task::from_record).collect()
    }

    /// Get one task
    pub fn get(&self, id: &str) -> Result<Task> {
        let db = self.db.lock();
        Self::find(&db, id)
    }

    /// Replace the title and description of a task
    pub fn update(&self, id: &str, input: TaskUpdate) -> Result<Task> {
        let title = required(input.title);
        let description = required(input.description);
        let (Some(title), Some(description)) = (title, description) else {
            return Err(StoreError::Validation(
                "Title or Description must be filled".to_string(),
            ));
        };

        let mut db = self.db.lock();
        let mut task = Self::find(&db, id)?;

        task.title = title;
        task.description = description;
        task.updated_at = Utc::now();

        db.update(Self::COLLECTION, id, task.to_record()?)?;

        tracing::info!(id, "Task updated");
        Ok(task)
    }

    /// Flip the completion state of a task
    ///
    /// An open task gets `completed_at = now`; a completed one is reopened.
    pub fn toggle_complete(&self, id: &str) -> Result<Task> {
        let mut db = self.db.lock();
        let mut task = Self::find(&db, id)?;

        task.completed_at = match task.completed_at {
            Some(_) => None,
            None => Some(Utc::now()),
        };

        db.update(Self::COLLECTION, id, task.to_record()?)?;

        tracing::info!(id, completed = task.is_completed(), "Task completion toggled");
        Ok(task)
    }

    /// Delete a task
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut db = self.db.lock();
        Self::find(&db, id)?;

        db.delete(Self::COLLECTION, id)?;

        tracing::info!(id, "Task deleted");
        Ok(())
    }

    fn find(db: &Database, id: &str) -> Result<Task> {
        db.select(Self::COLLECTION, Some(&Filter::by_id(id)))
            .into_iter()
            .next()
            .map(Task::from_record)
            .unwrap_or_else(|| Err(StoreError::NotFound(id.to_string())))
    }
}
