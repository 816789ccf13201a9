//! Application state

use std::path::PathBuf;
use std::sync::Arc;

use tasklist_core::task::{FileTaskStore, TaskRepository};

use crate::csrf::CsrfToken;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_store: Arc<dyn TaskRepository>,
    csrf: CsrfToken,
}

impl AppState {
    /// Create a new AppState with a file-backed store in the given data directory
    pub async fn new(data_dir: PathBuf) -> tasklist_core::Result<Self> {
        let tasks_path = data_dir.join("tasks.json");
        let task_store = Arc::new(FileTaskStore::new(tasks_path).await?);
        Ok(Self::with_store(task_store))
    }

    /// Create an AppState around an already-built store
    pub fn with_store(task_store: Arc<dyn TaskRepository>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                task_store,
                csrf: CsrfToken::generate(),
            }),
        }
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &dyn TaskRepository {
        self.inner.task_store.as_ref()
    }

    /// The anti-forgery token embedded in every form
    pub fn csrf(&self) -> &CsrfToken {
        &self.inner.csrf
    }
}
