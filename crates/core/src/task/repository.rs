//! Task repository trait
//!
//! Defines the interface for task storage operations. Handlers depend on
//! this trait rather than a concrete store, so tests can swap in a store
//! backed by a throwaway directory.

use async_trait::async_trait;

use super::model::Task;
use crate::Result;

/// Repository interface for task CRUD operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task, assigning the next unused id
    ///
    /// Fails with `Error::InvalidInput` if the title trims to empty.
    async fn create(&self, title: &str, description: &str) -> Result<Task>;

    /// Get a task by id, failing with `Error::TaskNotFound` if absent
    async fn get(&self, id: u64) -> Result<Task>;

    /// Get all tasks in creation order
    async fn list_all(&self) -> Result<Vec<Task>>;

    /// Overwrite title and description of an existing task
    ///
    /// Fails with `Error::TaskNotFound` if the id is absent and with
    /// `Error::InvalidInput` if the new title trims to empty. The id is
    /// never changed.
    async fn update(&self, id: u64, title: &str, description: &str) -> Result<Task>;

    /// Delete a task by id; deleting an absent id is a silent no-op
    async fn delete(&self, id: u64) -> Result<()>;

    /// Number of currently stored tasks
    async fn count(&self) -> Result<usize>;
}
