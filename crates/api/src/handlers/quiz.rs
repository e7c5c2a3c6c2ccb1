//! Handlers for the `/quiz` resource.
//!
//! Quiz creation and listing, the answer-key-free question listing shown to
//! quiz takers, and grading of submitted answers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quizline_core::grading::{self, GradableQuestion, SubmittedAnswer};
use quizline_core::question::QuestionType;
use quizline_core::quiz::normalize_title;
use quizline_core::types::DbId;
use quizline_db::models::question::QuestionWithOptions;
use quizline_db::models::quiz::{CreateQuiz, QuizSummary, QuizWithQuestions};
use quizline_db::repositories::{QuestionRepo, QuizRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::response::{DataResponse, Envelope, MessageResponse};
use crate::state::AppState;

/// Request body for `POST /quiz`.
#[derive(Debug, Deserialize)]
pub struct CreateQuizRequest {
    pub title: Option<String>,
}

/// Request body for `POST /quiz/{quiz_id}/submit`.
///
/// `answers` is kept as raw JSON so a missing or non-array value can be
/// reported with the same message as an empty one.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswersRequest {
    pub answers: Option<serde_json::Value>,
}

/// Listing payload for `GET /quiz`.
#[derive(Debug, Serialize)]
pub struct QuizList {
    pub count: usize,
    pub quizzes: Vec<QuizSummary>,
}

/// An option as shown before submission: no correctness flag.
#[derive(Debug, Serialize)]
pub struct PublicOption {
    pub id: DbId,
    pub text: String,
}

/// A question as shown before submission: the answer key is withheld.
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: DbId,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub hint: String,
    pub marks: i32,
    pub options: Vec<PublicOption>,
}

impl From<QuestionWithOptions> for PublicQuestion {
    fn from(q: QuestionWithOptions) -> Self {
        let is_text = q.question.question_type == QuestionType::Text.as_str();
        let options = if is_text {
            Vec::new()
        } else {
            q.options
                .into_iter()
                .map(|o| PublicOption {
                    id: o.id,
                    text: o.text,
                })
                .collect()
        };

        PublicQuestion {
            id: q.question.id,
            text: q.question.text,
            question_type: q.question.question_type,
            hint: q.question.hint,
            marks: q.question.marks,
            options,
        }
    }
}

/// Payload for `GET /quiz/{quiz_id}/questions`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestions {
    pub quiz_id: DbId,
    pub title: String,
    pub total_questions: usize,
    pub questions: Vec<PublicQuestion>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/quiz
///
/// Create an empty quiz from a title.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateQuizRequest>,
) -> AppResult<impl IntoResponse> {
    let title = normalize_title(input.title.as_deref())?;
    let quiz = QuizRepo::create(&state.pool, &CreateQuiz { title }).await?;

    tracing::info!(quiz_id = quiz.id, title = %quiz.title, "Quiz created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            "Successfully created the quiz",
            QuizWithQuestions {
                quiz,
                questions: Vec::new(),
            },
        )),
    ))
}

/// GET /api/quiz
///
/// List every quiz with its question count.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let quizzes = QuizRepo::list_summaries(&state.pool).await?;
    Ok(Json(Envelope::new(QuizList {
        count: quizzes.len(),
        quizzes,
    })))
}

/// DELETE /api/quiz/{quiz_id}
///
/// Remove the quiz record. Its questions stay in place.
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(quiz_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !QuizRepo::delete(&state.pool, quiz_id).await? {
        return Err(AppError::not_found("Quiz", quiz_id));
    }

    tracing::info!(quiz_id, "Quiz deleted");

    Ok(Json(MessageResponse::new("Quiz deleted successfully")))
}

/// GET /api/quiz/{quiz_id}/questions
///
/// The quiz's questions in display order, without correctness flags or
/// reference answers.
pub async fn questions(
    State(state): State<AppState>,
    ApiPath(quiz_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let quiz = QuizRepo::find_by_id(&state.pool, quiz_id)
        .await?
        .ok_or(AppError::not_found("Quiz", quiz_id))?;

    let questions: Vec<PublicQuestion> = QuestionRepo::list_for_quiz(&state.pool, quiz.id)
        .await?
        .into_iter()
        .map(PublicQuestion::from)
        .collect();

    Ok(Json(Envelope::new(QuizQuestions {
        quiz_id: quiz.id,
        title: quiz.title,
        total_questions: questions.len(),
        questions,
    })))
}

/// POST /api/quiz/{quiz_id}/submit
///
/// Grade a batch of answers against the quiz's stored answer key.
pub async fn submit(
    State(state): State<AppState>,
    ApiPath(quiz_id): ApiPath<DbId>,
    ApiJson(input): ApiJson<SubmitAnswersRequest>,
) -> AppResult<impl IntoResponse> {
    let answers = parse_answers(input.answers)?;

    let quiz = QuizRepo::find_by_id(&state.pool, quiz_id)
        .await?
        .ok_or(AppError::not_found("Quiz", quiz_id))?;

    let questions = QuestionRepo::list_for_quiz(&state.pool, quiz.id)
        .await?
        .iter()
        .map(QuestionWithOptions::to_gradable)
        .collect::<Result<Vec<GradableQuestion>, _>>()?;

    let report = grading::grade(&questions, &answers);

    tracing::info!(
        quiz_id = quiz.id,
        answers = answers.len(),
        score = report.score,
        total_marks = report.total_marks,
        "Quiz submission graded",
    );

    Ok(Json(Envelope::new(report)))
}

/// Validate the raw `answers` value and decode it.
fn parse_answers(raw: Option<serde_json::Value>) -> AppResult<Vec<SubmittedAnswer>> {
    let raw = match raw {
        Some(serde_json::Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(AppError::validation("Answers are required")),
    };

    raw.into_iter()
        .map(serde_json::from_value::<SubmittedAnswer>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::BadRequest(format!("Invalid answer entry: {e}")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use quizline_core::error::CoreError;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_answers_rejects_missing_or_empty() {
        for raw in [None, Some(json!([])), Some(json!({})), Some(json!("x"))] {
            assert_matches!(
                parse_answers(raw),
                Err(AppError::Core(CoreError::Validation(msg))) if msg == "Answers are required"
            );
        }
    }

    #[test]
    fn test_parse_answers_rejects_malformed_entry() {
        let raw = Some(json!([{ "questionId": 1, "selectedOptionIds": "not-a-list" }]));
        assert_matches!(parse_answers(raw), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn test_parse_answers_decodes_entries() {
        let raw = Some(json!([
            { "questionId": 7, "selectedOptionIds": [1, "2"] },
            { "questionId": "8", "textAnswer": "Paris" }
        ]));
        let answers = parse_answers(raw).unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[1].text_answer.as_deref(), Some("Paris"));
    }
}
