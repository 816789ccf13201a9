//! Task pages
//!
//! The five page handlers: index, detail, new, update, delete. Each maps a
//! request to a rendered page or a redirect back to the index. Validation
//! failures re-render the submitted form with inline errors and never reach
//! the store; unknown ids on the read paths propagate as 404.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;

use tasklist_core::task::{NewTaskForm, TaskFields, TaskRepository, UpdateTaskForm};

use crate::error::PageError;
use crate::state::AppState;
use crate::views;

/// A submitted task form body: the anti-forgery token plus the recognized
/// task fields. Anything else in the body is ignored.
#[derive(Debug, Deserialize)]
struct SubmittedForm {
    #[serde(default)]
    csrf_token: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

impl SubmittedForm {
    fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, Html(views::forbidden_page())).into_response()
}

/// GET / - list all tasks
async fn index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let tasks = state.task_store().list_all().await?;
    Ok(Html(views::index_page(&tasks)))
}

/// GET /{id}/ - show one task
async fn detail(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Html<String>, PageError> {
    let task = state.task_store().get(id).await?;
    Ok(Html(views::detail_page(&task)))
}

/// GET /new/ - empty creation form
async fn new_form(State(state): State<AppState>) -> Html<String> {
    Html(views::new_page(&NewTaskForm::empty(), state.csrf().value()))
}

/// POST /new/ - validate and create
async fn create(
    State(state): State<AppState>,
    Form(submitted): Form<SubmittedForm>,
) -> Result<Response, PageError> {
    if !state.csrf().matches(&submitted.csrf_token) {
        return Ok(forbidden());
    }

    let form = NewTaskForm::bind(submitted.fields());
    if !form.is_valid() {
        return Ok(Html(views::new_page(&form, state.csrf().value())).into_response());
    }

    let task = form.save(state.task_store()).await?;
    tracing::info!(id = task.id, "task created");
    Ok(Redirect::to("/").into_response())
}

/// GET /{id}/update/ - form pre-filled from the existing task
async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Html<String>, PageError> {
    let task = state.task_store().get(id).await?;
    let form = UpdateTaskForm::for_task(&task);
    Ok(Html(views::update_page(&task, &form, state.csrf().value())))
}

/// POST /{id}/update/ - validate and overwrite in place
async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(submitted): Form<SubmittedForm>,
) -> Result<Response, PageError> {
    if !state.csrf().matches(&submitted.csrf_token) {
        return Ok(forbidden());
    }

    let task = state.task_store().get(id).await?;
    let form = UpdateTaskForm::bind(submitted.fields(), task.id);
    if !form.is_valid() {
        return Ok(Html(views::update_page(&task, &form, state.csrf().value())).into_response());
    }

    form.save(state.task_store()).await?;
    tracing::info!(id, "task updated");
    Ok(Redirect::to("/").into_response())
}

/// GET /{id}/delete/ - delete unconditionally and go back to the index
///
/// Deleting an id that is already gone still redirects; the store treats
/// it as a no-op.
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Redirect, PageError> {
    state.task_store().delete(id).await?;
    tracing::info!(id, "task deleted");
    Ok(Redirect::to("/"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/new/", get(new_form).post(create))
        .route("/{id}/", get(detail))
        .route("/{id}/update/", get(update_form).post(update))
        .route("/{id}/delete/", get(delete))
}
