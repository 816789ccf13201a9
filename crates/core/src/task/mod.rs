//! Task module
//!
//! This module contains the task record, its store, and the validation
//! forms that guard the write paths.

mod file_store;
mod forms;
mod model;
mod repository;

pub use file_store::FileTaskStore;
pub use forms::{FormErrors, NewTaskForm, TaskFields, UpdateTaskForm, FORM_FIELDS, REQUIRED_MESSAGE};
pub use model::Task;
pub use repository::TaskRepository;
