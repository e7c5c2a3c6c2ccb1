pub mod health;
pub mod question;
pub mod quiz;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /quiz                                  list, create
/// /quiz/{quiz_id}                        delete
/// /quiz/{quiz_id}/questions              public question listing
/// /quiz/{quiz_id}/submit                 grade answers (POST)
///
/// /question/quiz/{quiz_id}/questions     append question (POST)
/// /question/{question_id}                get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/quiz", quiz::router())
        .nest("/question", question::router())
}
