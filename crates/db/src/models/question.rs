//! Question and answer option entity models.
//!
//! A question belongs to one quiz (`quiz_id`) and sits at a `position` in
//! that quiz's ordered question list. Choice questions own rows in
//! `question_options`; free-text questions store a reference answer instead.

use std::str::FromStr;

use quizline_core::error::CoreError;
use quizline_core::grading::{GradableOption, GradableQuestion};
use quizline_core::question::{OptionDraft, QuestionDraft, QuestionType};
use quizline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: DbId,
    #[serde(rename = "quiz")]
    pub quiz_id: DbId,
    #[serde(skip)]
    pub position: i32,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_text_answer: Option<String>,
    pub hint: String,
    pub marks: i32,
    pub created_at: Timestamp,
}

/// A row from the `question_options` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: DbId,
    #[serde(skip)]
    pub question_id: DbId,
    #[serde(skip)]
    pub sort_order: i32,
    pub text: String,
    pub is_correct: bool,
}

/// A question together with its options, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionWithOptions {
    #[serde(flatten)]
    pub question: Question,
    pub options: Vec<QuestionOption>,
}

/// A question enriched with the title of the quiz that owns it.
///
/// `quiz_title` is `None` when the owning quiz has been deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    #[serde(flatten)]
    pub question: QuestionWithOptions,
    pub quiz_title: Option<String>,
}

impl QuestionWithOptions {
    /// Parse the stored type tag.
    pub fn question_type(&self) -> Result<QuestionType, CoreError> {
        QuestionType::from_str(&self.question.question_type).map_err(|_| {
            CoreError::Internal(format!(
                "Question {} has unknown stored type '{}'",
                self.question.id, self.question.question_type
            ))
        })
    }

    /// Rebuild the editable draft this record was persisted from.
    pub fn to_draft(&self) -> Result<QuestionDraft, CoreError> {
        Ok(QuestionDraft {
            text: self.question.text.clone(),
            question_type: self.question_type()?,
            options: self
                .options
                .iter()
                .map(|o| OptionDraft {
                    text: o.text.clone(),
                    is_correct: o.is_correct,
                })
                .collect(),
            correct_text_answer: self.question.correct_text_answer.clone(),
            hint: self.question.hint.clone(),
            marks: self.question.marks,
        })
    }

    /// The answer-key view used for grading.
    pub fn to_gradable(&self) -> Result<GradableQuestion, CoreError> {
        Ok(GradableQuestion {
            id: self.question.id,
            question_type: self.question_type()?,
            marks: self.question.marks,
            options: self
                .options
                .iter()
                .map(|o| GradableOption {
                    id: o.id,
                    text: o.text.clone(),
                    is_correct: o.is_correct,
                })
                .collect(),
            correct_text_answer: self.question.correct_text_answer.clone(),
        })
    }
}
