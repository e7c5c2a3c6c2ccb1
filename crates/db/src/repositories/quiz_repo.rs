//! Repository for the `quizzes` table.

use quizline_core::types::DbId;
use sqlx::PgPool;

use crate::models::quiz::{CreateQuiz, Quiz, QuizSummary};

/// Column list for the `quizzes` table.
const COLUMNS: &str = "id, title, created_at";

/// Provides CRUD operations for quizzes.
pub struct QuizRepo;

impl QuizRepo {
    /// Insert a new, empty quiz.
    pub async fn create(pool: &PgPool, input: &CreateQuiz) -> Result<Quiz, sqlx::Error> {
        let query = format!("INSERT INTO quizzes (title) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Quiz>(&query)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// Find a quiz by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quizzes WHERE id = $1");
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Ordered question ids of a quiz.
    pub async fn question_ids(pool: &PgPool, quiz_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM questions WHERE quiz_id = $1 ORDER BY position, id",
        )
        .bind(quiz_id)
        .fetch_all(pool)
        .await
    }

    /// List every quiz with its question count, oldest first.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<QuizSummary>, sqlx::Error> {
        sqlx::query_as::<_, QuizSummary>(
            "SELECT z.id, z.title, z.created_at, COUNT(q.id) AS question_count \
             FROM quizzes z \
             LEFT JOIN questions q ON q.quiz_id = z.id \
             GROUP BY z.id \
             ORDER BY z.created_at, z.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Delete a quiz record. Its questions are left in place.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
