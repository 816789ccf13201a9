//! Mapping of core errors onto HTTP responses
//!
//! Validation never reaches this point; handlers deal with it inline.
//! Missing ids become 404 pages, anything else becomes a 500.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::views;

#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Core(#[from] tasklist_core::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::Core(tasklist_core::Error::TaskNotFound(id)) => {
                (StatusCode::NOT_FOUND, Html(views::not_found_page(id))).into_response()
            }
            Self::Core(err) => {
                tracing::error!(%err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::server_error_page()),
                )
                    .into_response()
            }
        }
    }
}
