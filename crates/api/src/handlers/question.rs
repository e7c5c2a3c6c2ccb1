//! Handlers for the `/question` resource.
//!
//! Questions are created under a quiz and then addressed by their own id.
//! Every write re-checks the full set of question rules before it reaches
//! the database.

use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quizline_core::question::{
    validate_question, OptionDraft, QuestionDraft, QuestionType, DEFAULT_MARKS,
};
use quizline_core::types::DbId;
use quizline_db::repositories::{QuestionRepo, QuizRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// An answer option as submitted by a client.
///
/// `text` is optional here so a missing text is reported by the question
/// rules rather than as a decoding failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionInput {
    pub text: Option<String>,
    pub is_correct: Option<bool>,
}

impl From<OptionInput> for OptionDraft {
    fn from(input: OptionInput) -> Self {
        OptionDraft {
            text: input.text.unwrap_or_default(),
            is_correct: input.is_correct.unwrap_or(false),
        }
    }
}

/// Request body for `POST /question/quiz/{quiz_id}/questions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    pub options: Option<Vec<OptionInput>>,
    pub correct_text_answer: Option<String>,
    pub hint: Option<String>,
    pub marks: Option<i32>,
}

/// Fields a client may change on an existing question.
///
/// Anything not listed here (owning quiz, id, timestamps) is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    pub options: Option<Vec<OptionInput>>,
    pub correct_text_answer: Option<String>,
    pub hint: Option<String>,
    pub marks: Option<i32>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/question/quiz/{quiz_id}/questions
///
/// Append a new question to a quiz.
pub async fn create(
    State(state): State<AppState>,
    ApiPath(quiz_id): ApiPath<DbId>,
    ApiJson(input): ApiJson<CreateQuestionRequest>,
) -> AppResult<impl IntoResponse> {
    let (text, question_type) = match (non_blank(&input.text), non_blank(&input.question_type)) {
        (Some(text), Some(question_type)) => (text, question_type),
        _ => return Err(AppError::validation("Text and type are required")),
    };

    QuizRepo::find_by_id(&state.pool, quiz_id)
        .await?
        .ok_or(AppError::not_found("Quiz", quiz_id))?;

    let draft = QuestionDraft {
        text: text.to_string(),
        question_type: QuestionType::from_str(question_type)?,
        options: input
            .options
            .unwrap_or_default()
            .into_iter()
            .map(OptionDraft::from)
            .collect(),
        correct_text_answer: input.correct_text_answer,
        hint: input.hint.unwrap_or_default(),
        marks: marks_or_default(input.marks),
    }
    .shaped_for_type();
    validate_question(&draft)?;

    // The quiz can vanish between the lookup above and the insert.
    let question = QuestionRepo::create(&state.pool, quiz_id, &draft)
        .await?
        .ok_or(AppError::not_found("Quiz", quiz_id))?;

    tracing::info!(
        quiz_id,
        question_id = question.question.id,
        question_type = %draft.question_type,
        "Question added",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            "Question added successfully",
            question,
        )),
    ))
}

/// GET /api/question/{question_id}
///
/// A question with its full answer key and the owning quiz's title.
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(question_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = QuestionRepo::find_detail_by_id(&state.pool, question_id)
        .await?
        .ok_or(AppError::not_found("Question", question_id))?;
    Ok(Json(DataResponse::new(detail)))
}

/// PUT /api/question/{question_id}
///
/// Apply a partial update and re-check every question rule against the
/// merged record. Options are only rewritten when the update carries them.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(question_id): ApiPath<DbId>,
    ApiJson(body): ApiJson<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    if !body.is_object() {
        return Err(AppError::validation(
            "Request body must be a valid object with fields to update",
        ));
    }
    let patch: UpdateQuestionRequest = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid question update: {e}")))?;

    let existing = QuestionRepo::find_by_id_with_options(&state.pool, question_id)
        .await?
        .ok_or(AppError::not_found("Question", question_id))?;

    let (draft, replace_options) = apply_patch(existing.to_draft()?, patch)?;
    validate_question(&draft)?;

    let question = QuestionRepo::update(&state.pool, question_id, &draft, replace_options)
        .await?
        .ok_or(AppError::not_found("Question", question_id))?;

    tracing::info!(question_id, replace_options, "Question updated");

    Ok(Json(DataResponse::with_message(
        "Question updated successfully",
        question,
    )))
}

/// DELETE /api/question/{question_id}
///
/// Delete a question and drop it from its quiz's question list.
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(question_id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !QuestionRepo::delete(&state.pool, question_id).await? {
        return Err(AppError::not_found("Question", question_id));
    }

    tracing::info!(question_id, "Question deleted");

    Ok(Json(MessageResponse::new("Question deleted successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Marks for a new question: absent or zero means the default.
fn marks_or_default(marks: Option<i32>) -> i32 {
    match marks {
        Some(0) | None => DEFAULT_MARKS,
        Some(marks) => marks,
    }
}

/// The trimmed value, or `None` when absent or blank.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Merge an update onto the stored draft.
///
/// Options are left exactly as merged so the question rules see them; only a
/// stale reference answer is dropped once the question is a choice type.
/// Returns the merged draft and whether the patch carried its own options.
fn apply_patch(
    mut draft: QuestionDraft,
    patch: UpdateQuestionRequest,
) -> Result<(QuestionDraft, bool), AppError> {
    if let Some(text) = patch.text {
        draft.text = text.trim().to_string();
    }
    if let Some(question_type) = patch.question_type {
        draft.question_type = QuestionType::from_str(question_type.trim())?;
    }
    let options_supplied = patch.options.is_some();
    if let Some(options) = patch.options {
        draft.options = options.into_iter().map(OptionDraft::from).collect();
    }
    if let Some(answer) = patch.correct_text_answer {
        draft.correct_text_answer = Some(answer);
    }
    if let Some(hint) = patch.hint {
        draft.hint = hint;
    }
    if let Some(marks) = patch.marks {
        draft.marks = marks;
    }
    if draft.question_type.is_choice() {
        draft.correct_text_answer = None;
    }
    Ok((draft, options_supplied))
}
