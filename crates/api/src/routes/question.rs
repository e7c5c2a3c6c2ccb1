//! Route definitions for questions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::question;
use crate::state::AppState;

/// Routes mounted at `/question`.
///
/// ```text
/// POST   /quiz/{quiz_id}/questions   -> create
/// GET    /{question_id}              -> get_by_id
/// PUT    /{question_id}              -> update
/// DELETE /{question_id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quiz/{quiz_id}/questions", post(question::create))
        .route(
            "/{question_id}",
            get(question::get_by_id)
                .put(question::update)
                .delete(question::delete),
        )
}
