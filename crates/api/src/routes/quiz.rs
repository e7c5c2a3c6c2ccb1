//! Route definitions for quizzes and quiz submissions.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::quiz;
use crate::state::AppState;

/// Routes mounted at `/quiz`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// DELETE /{quiz_id}               -> delete
/// GET    /{quiz_id}/questions     -> questions
/// POST   /{quiz_id}/submit        -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quiz::list).post(quiz::create))
        .route("/{quiz_id}", delete(quiz::delete))
        .route("/{quiz_id}/questions", get(quiz::questions))
        .route("/{quiz_id}/submit", post(quiz::submit))
}
