//! File-based task storage implementation
//!
//! Stores tasks as JSON in a file on disk. The file carries the id counter
//! alongside the records so ids are never reused across restarts.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

use super::model::Task;
use super::repository::TaskRepository;
use crate::{Error, Result};

/// On-disk representation of the store
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    next_id: u64,
    tasks: Vec<Task>,
}

/// In-memory state guarded by one lock, so a mutation and its persist step
/// cannot interleave with another writer
#[derive(Debug, Default)]
struct StoreState {
    next_id: u64,
    tasks: BTreeMap<u64, Task>,
}

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let file: StoreFile = serde_json::from_str(&content)?;
            let highest = file.tasks.iter().map(|t| t.id).max().unwrap_or(0);
            StoreState {
                next_id: file.next_id.max(highest + 1).max(1),
                tasks: file.tasks.into_iter().map(|t| (t.id, t)).collect(),
            }
        } else {
            StoreState {
                next_id: 1,
                tasks: BTreeMap::new(),
            }
        };

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Persist the given state to disk
    ///
    /// Called with the write guard still held by the mutating operation.
    async fn persist(&self, state: &StoreState) -> Result<()> {
        let file = StoreFile {
            next_id: state.next_id,
            tasks: state.tasks.values().cloned().collect(),
        };
        let content = serde_json::to_string_pretty(&file)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

fn checked_title(title: &str) -> Result<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("title must not be empty".to_string()));
    }
    Ok(trimmed)
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn create(&self, title: &str, description: &str) -> Result<Task> {
        let title = checked_title(title)?;

        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;

        let task = Task::new(id, title, description);
        state.tasks.insert(id, task.clone());
        self.persist(&state).await?;

        tracing::debug!(id, "created task");
        Ok(task)
    }

    async fn get(&self, id: u64) -> Result<Task> {
        let state = self.state.read().await;
        state.tasks.get(&id).cloned().ok_or(Error::TaskNotFound(id))
    }

    async fn list_all(&self) -> Result<Vec<Task>> {
        let state = self.state.read().await;
        // BTreeMap iterates in ascending id order, which is creation order
        Ok(state.tasks.values().cloned().collect())
    }

    async fn update(&self, id: u64, title: &str, description: &str) -> Result<Task> {
        let title = checked_title(title)?;

        let mut state = self.state.write().await;
        let task = state.tasks.get_mut(&id).ok_or(Error::TaskNotFound(id))?;
        task.title = title.to_string();
        task.description = description.to_string();
        task.updated_at = Utc::now();
        let updated = task.clone();
        self.persist(&state).await?;

        tracing::debug!(id, "updated task");
        Ok(updated)
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let mut state = self.state.write().await;
        if state.tasks.remove(&id).is_some() {
            self.persist(&state).await?;
            tracing::debug!(id, "deleted task");
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let state = self.state.read().await;
        Ok(state.tasks.len())
    }
}
