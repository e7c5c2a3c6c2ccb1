//! Quiz entity model and DTOs.

use quizline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `quizzes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
}

/// A quiz with its ordered question ids.
#[derive(Debug, Clone, Serialize)]
pub struct QuizWithQuestions {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<DbId>,
}

/// Listing projection: a quiz and how many questions it holds.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub question_count: i64,
}

/// DTO for creating a new quiz. The title is expected to be trimmed already.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuiz {
    pub title: String,
}
