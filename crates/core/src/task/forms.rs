//! Validation forms for the task write paths
//!
//! A form binds submitted field values, checks them, and only on an
//! explicit `save` call touches the store. That split lets a handler
//! re-render the page with inline errors without ever mutating anything.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::model::Task;
use super::repository::TaskRepository;
use crate::{Error, Result};

/// The only field names a task form recognizes
pub const FORM_FIELDS: &[&str] = &["title", "description"];

/// Message attached to a required field that was submitted empty
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Raw submitted field values
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Per-field validation messages, keyed by field name
#[derive(Debug, Clone, Default)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }
}

/// Shared rule set for both forms: title required, description optional
fn check(fields: &TaskFields) -> FormErrors {
    let mut errors = FormErrors::default();
    if fields.title.trim().is_empty() {
        errors.add("title", REQUIRED_MESSAGE);
    }
    errors
}

/// Form for creating a task
#[derive(Debug, Clone)]
pub struct NewTaskForm {
    pub fields: TaskFields,
    pub errors: FormErrors,
}

impl NewTaskForm {
    /// An unbound form with no values and no errors, for the initial GET
    pub fn empty() -> Self {
        Self {
            fields: TaskFields::default(),
            errors: FormErrors::default(),
        }
    }

    /// Bind submitted values and validate them
    pub fn bind(fields: TaskFields) -> Self {
        let errors = check(&fields);
        Self { fields, errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Create the task in the store; only valid forms may be saved
    pub async fn save(&self, store: &dyn TaskRepository) -> Result<Task> {
        if !self.is_valid() {
            return Err(Error::InvalidInput("cannot save an invalid form".to_string()));
        }
        store.create(&self.fields.title, &self.fields.description).await
    }
}

/// Form for updating an existing task
///
/// Same field set and rules as [`NewTaskForm`], but bound to a target id;
/// saving overwrites that task instead of creating a new one.
#[derive(Debug, Clone)]
pub struct UpdateTaskForm {
    pub fields: TaskFields,
    pub errors: FormErrors,
    target: u64,
}

impl UpdateTaskForm {
    /// A form pre-filled from an existing task, for the initial GET
    pub fn for_task(task: &Task) -> Self {
        Self {
            fields: TaskFields {
                title: task.title.clone(),
                description: task.description.clone(),
            },
            errors: FormErrors::default(),
            target: task.id,
        }
    }

    /// Bind submitted values against the task identified by `target`
    pub fn bind(fields: TaskFields, target: u64) -> Self {
        let errors = check(&fields);
        Self {
            fields,
            errors,
            target,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Overwrite the target task in the store; only valid forms may be saved
    pub async fn save(&self, store: &dyn TaskRepository) -> Result<Task> {
        if !self.is_valid() {
            return Err(Error::InvalidInput("cannot save an invalid form".to_string()));
        }
        store
            .update(self.target, &self.fields.title, &self.fields.description)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::FileTaskStore;
    use tempfile::TempDir;

    fn fields(title: &str, description: &str) -> TaskFields {
        TaskFields {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    async fn create_test_store() -> (FileTaskStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTaskStore::new(temp_dir.path().join("tasks.json"))
            .await
            .unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_recognized_fields() {
        assert!(FORM_FIELDS.contains(&"title"));
        assert!(FORM_FIELDS.contains(&"description"));
        assert_eq!(FORM_FIELDS.len(), 2);
    }

    #[test]
    fn test_new_form_can_be_valid() {
        let form = NewTaskForm::bind(fields("The Title", "The Description"));
        assert!(form.is_valid());
    }

    #[test]
    fn test_new_form_requires_title() {
        let form = NewTaskForm::bind(fields("", "The Description"));
        assert!(!form.is_valid());
        assert_eq!(form.errors.field("title"), [REQUIRED_MESSAGE.to_string()]);
    }

    #[test]
    fn test_whitespace_title_is_invalid() {
        let form = NewTaskForm::bind(fields("   ", ""));
        assert!(!form.is_valid());
    }

    #[test]
    fn test_description_is_optional() {
        let form = NewTaskForm::bind(fields("The Title", ""));
        assert!(form.is_valid());
    }

    #[tokio::test]
    async fn test_binding_does_not_touch_store() {
        let (store, _temp) = create_test_store().await;

        let form = NewTaskForm::bind(fields("The Title", "The Description"));
        assert!(form.is_valid());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_new_form_save_creates_task() {
        let (store, _temp) = create_test_store().await;

        let form = NewTaskForm::bind(fields("The Title", "The Description"));
        let task = form.save(&store).await.unwrap();

        assert_eq!(task.title, "The Title");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_form_refuses_to_save() {
        let (store, _temp) = create_test_store().await;

        let form = NewTaskForm::bind(fields("", "The Description"));
        assert!(form.save(&store).await.is_err());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_form_can_be_valid() {
        let (store, _temp) = create_test_store().await;
        let task = store.create("First task", "").await.unwrap();

        let form = UpdateTaskForm::bind(fields("The Title", "The Description"), task.id);
        assert!(form.is_valid());

        form.save(&store).await.unwrap();
        assert_eq!(store.get(task.id).await.unwrap().title, "The Title");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_form_can_be_invalid() {
        let (store, _temp) = create_test_store().await;
        let task = store.create("First task", "").await.unwrap();

        let form = UpdateTaskForm::bind(fields("", "The Description"), task.id);
        assert!(!form.is_valid());
        assert_eq!(form.errors.field("title"), [REQUIRED_MESSAGE.to_string()]);

        // The stored task is untouched
        assert_eq!(store.get(task.id).await.unwrap().title, "First task");
    }

    #[tokio::test]
    async fn test_update_form_prefills_from_task() {
        let (store, _temp) = create_test_store().await;
        let task = store.create("First task", "The description").await.unwrap();

        let form = UpdateTaskForm::for_task(&task);
        assert_eq!(form.fields.title, "First task");
        assert_eq!(form.fields.description, "The description");
        assert_eq!(form.target(), task.id);
        assert!(form.is_valid());
    }
}
