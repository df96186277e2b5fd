//! Task model
//!
//! Typed view of the records stored in the `tasks` collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::store::Record;

/// A stored task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Input for creating a task
///
/// Fields are optional so that a missing field reaches validation instead of
/// failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Input for replacing the text of a task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }
}

impl TaskUpdate {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }
}

impl Task {
    /// Build a fresh, uncompleted task with a new id
    pub fn create(title: String, description: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Convert into a store record
    pub fn to_record(&self) -> Result<Record> {
        match serde_json::to_value(self) {
            Ok(Value::Object(record)) => Ok(record),
            Ok(other) => Err(StoreError::Serialization(format!(
                "task serialized to {} instead of an object",
                other
            ))),
            Err(e) => Err(StoreError::Serialization(e.to_string())),
        }
    }

    /// Parse a store record
    pub fn from_record(record: Record) -> Result<Self> {
        serde_json::from_value(Value::Object(record))
            .map_err(|e| StoreError::Corrupted(format!("invalid task record: {}", e)))
    }
}

/// Take a required text field, treating blank input as missing
pub(crate) fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}
