//! Repository for the `questions` and `question_options` tables.
//!
//! A quiz's question list is the set of `questions` rows carrying its
//! `quiz_id`, ordered by `position`. Appending a question and writing its
//! options happen in one transaction, so the list and the question rows
//! never disagree.

use std::collections::HashMap;

use quizline_core::question::{OptionDraft, QuestionDraft};
use quizline_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::question::{Question, QuestionDetail, QuestionOption, QuestionWithOptions};

/// Column list for the `questions` table.
const COLUMNS: &str = "id, quiz_id, position, text, question_type, correct_text_answer, \
    hint, marks, created_at";

/// Column list for the `question_options` table.
const OPTION_COLUMNS: &str = "id, question_id, sort_order, text, is_correct";

/// Provides CRUD operations for questions and their options.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Append a new question to the end of a quiz's question list.
    ///
    /// The quiz row is locked for the duration of the transaction so that
    /// concurrent appends receive distinct positions. Returns `None` if the
    /// quiz does not exist.
    pub async fn create(
        pool: &PgPool,
        quiz_id: DbId,
        draft: &QuestionDraft,
    ) -> Result<Option<QuestionWithOptions>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let quiz = sqlx::query_scalar::<_, DbId>("SELECT id FROM quizzes WHERE id = $1 FOR UPDATE")
            .bind(quiz_id)
            .fetch_optional(&mut *tx)
            .await?;
        if quiz.is_none() {
            return Ok(None);
        }

        let insert_query = format!(
            "INSERT INTO questions \
                (quiz_id, position, text, question_type, correct_text_answer, hint, marks) \
             VALUES ($1, \
                (SELECT COALESCE(MAX(position), 0) + 1 FROM questions WHERE quiz_id = $1), \
                $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let question = sqlx::query_as::<_, Question>(&insert_query)
            .bind(quiz_id)
            .bind(&draft.text)
            .bind(draft.question_type.as_str())
            .bind(&draft.correct_text_answer)
            .bind(&draft.hint)
            .bind(draft.marks)
            .fetch_one(&mut *tx)
            .await?;

        let options = Self::insert_options(&mut tx, question.id, &draft.options).await?;

        tx.commit().await?;
        Ok(Some(QuestionWithOptions { question, options }))
    }

    /// Find a question row by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a question by ID together with its options.
    pub async fn find_by_id_with_options(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<QuestionWithOptions>, sqlx::Error> {
        let Some(question) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let options = Self::options_for(pool, &[question.id]).await?;
        Ok(Some(QuestionWithOptions { question, options }))
    }

    /// Find a question by ID with its options and the owning quiz's title.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<QuestionDetail>, sqlx::Error> {
        let Some(question) = Self::find_by_id_with_options(pool, id).await? else {
            return Ok(None);
        };
        let quiz_title = sqlx::query_scalar::<_, String>("SELECT title FROM quizzes WHERE id = $1")
            .bind(question.question.quiz_id)
            .fetch_optional(pool)
            .await?;
        Ok(Some(QuestionDetail {
            question,
            quiz_title,
        }))
    }

    /// List a quiz's questions with their options, in display order.
    pub async fn list_for_quiz(
        pool: &PgPool,
        quiz_id: DbId,
    ) -> Result<Vec<QuestionWithOptions>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions \
             WHERE quiz_id = $1 \
             ORDER BY position, id"
        );
        let questions = sqlx::query_as::<_, Question>(&query)
            .bind(quiz_id)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = questions.iter().map(|q| q.id).collect();
        let mut by_question: HashMap<DbId, Vec<QuestionOption>> = HashMap::new();
        for option in Self::options_for(pool, &ids).await? {
            by_question
                .entry(option.question_id)
                .or_default()
                .push(option);
        }

        Ok(questions
            .into_iter()
            .map(|question| {
                let options = by_question.remove(&question.id).unwrap_or_default();
                QuestionWithOptions { question, options }
            })
            .collect())
    }

    /// Overwrite the editable fields of a question.
    ///
    /// `quiz_id`, `position` and `created_at` are never touched. When
    /// `replace_options` is set, the existing options are deleted and the
    /// draft's options inserted with fresh ids; otherwise they are left as
    /// they are. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        draft: &QuestionDraft,
        replace_options: bool,
    ) -> Result<Option<QuestionWithOptions>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE questions SET \
                text = $2, \
                question_type = $3, \
                correct_text_answer = $4, \
                hint = $5, \
                marks = $6 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let question = sqlx::query_as::<_, Question>(&update_query)
            .bind(id)
            .bind(&draft.text)
            .bind(draft.question_type.as_str())
            .bind(&draft.correct_text_answer)
            .bind(&draft.hint)
            .bind(draft.marks)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(question) = question else {
            return Ok(None);
        };

        let options = if replace_options {
            sqlx::query("DELETE FROM question_options WHERE question_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::insert_options(&mut tx, id, &draft.options).await?
        } else {
            Self::options_for(&mut *tx, &[id]).await?
        };

        tx.commit().await?;
        Ok(Some(QuestionWithOptions { question, options }))
    }

    /// Delete a question, which also drops it from its quiz's list.
    ///
    /// Options go with it via `ON DELETE CASCADE`. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Option helpers
    // -----------------------------------------------------------------------

    /// Options for the given questions, grouped by question and in display order.
    pub async fn options_for<'e, E>(
        executor: E,
        question_ids: &[DbId],
    ) -> Result<Vec<QuestionOption>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {OPTION_COLUMNS} FROM question_options \
             WHERE question_id = ANY($1) \
             ORDER BY question_id, sort_order, id"
        );
        sqlx::query_as::<_, QuestionOption>(&query)
            .bind(question_ids)
            .fetch_all(executor)
            .await
    }

    /// Insert options within an existing transaction, preserving input order.
    async fn insert_options(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        question_id: DbId,
        options: &[OptionDraft],
    ) -> Result<Vec<QuestionOption>, sqlx::Error> {
        let insert_query = format!(
            "INSERT INTO question_options (question_id, sort_order, text, is_correct) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {OPTION_COLUMNS}"
        );

        let mut inserted = Vec::with_capacity(options.len());
        for (index, option) in options.iter().enumerate() {
            let row = sqlx::query_as::<_, QuestionOption>(&insert_query)
                .bind(question_id)
                .bind(index as i32)
                .bind(&option.text)
                .bind(option.is_correct)
                .fetch_one(&mut **tx)
                .await?;
            inserted.push(row);
        }

        Ok(inserted)
    }
}
