//! Integration tests for the quiz and question repositories.
//!
//! Exercises the repository layer against a real database:
//! - Quiz create, list with counts, delete without cascade
//! - Question append order, option persistence, update and delete
//! - Question list consistency after deletes

use quizline_core::question::{OptionDraft, QuestionDraft, QuestionType};
use quizline_db::models::quiz::CreateQuiz;
use quizline_db::repositories::{QuestionRepo, QuizRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_quiz(title: &str) -> CreateQuiz {
    CreateQuiz {
        title: title.to_string(),
    }
}

fn single_choice(text: &str) -> QuestionDraft {
    QuestionDraft {
        text: text.to_string(),
        question_type: QuestionType::Single,
        options: vec![
            OptionDraft {
                text: "A".to_string(),
                is_correct: false,
            },
            OptionDraft {
                text: "B".to_string(),
                is_correct: true,
            },
            OptionDraft {
                text: "C".to_string(),
                is_correct: false,
            },
        ],
        correct_text_answer: None,
        hint: String::new(),
        marks: 2,
    }
}

fn free_text(text: &str, answer: &str) -> QuestionDraft {
    QuestionDraft {
        text: text.to_string(),
        question_type: QuestionType::Text,
        options: vec![],
        correct_text_answer: Some(answer.to_string()),
        hint: "Think about Europe".to_string(),
        marks: 3,
    }
}

// ---------------------------------------------------------------------------
// Test: Quiz CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_quiz_create_and_find(pool: PgPool) {
    let quiz = QuizRepo::create(&pool, &new_quiz("Math")).await.unwrap();
    assert_eq!(quiz.title, "Math");

    let found = QuizRepo::find_by_id(&pool, quiz.id)
        .await
        .unwrap()
        .expect("quiz should exist");
    assert_eq!(found.id, quiz.id);
    assert_eq!(found.title, "Math");
    assert!(QuizRepo::question_ids(&pool, quiz.id).await.unwrap().is_empty());

    assert!(QuizRepo::find_by_id(&pool, quiz.id + 1000)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_title_rejected_by_schema(pool: PgPool) {
    let result = QuizRepo::create(&pool, &new_quiz("   ")).await;
    assert!(result.is_err());
    assert!(QuizRepo::list_summaries(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_summaries_counts_questions(pool: PgPool) {
    let math = QuizRepo::create(&pool, &new_quiz("Math")).await.unwrap();
    let geo = QuizRepo::create(&pool, &new_quiz("Geography")).await.unwrap();

    QuestionRepo::create(&pool, math.id, &single_choice("1 + 1?"))
        .await
        .unwrap();
    QuestionRepo::create(&pool, math.id, &single_choice("2 + 2?"))
        .await
        .unwrap();

    let summaries = QuizRepo::list_summaries(&pool).await.unwrap();
    assert_eq!(summaries.len(), 2);

    let math_summary = summaries.iter().find(|s| s.id == math.id).unwrap();
    let geo_summary = summaries.iter().find(|s| s.id == geo.id).unwrap();
    assert_eq!(math_summary.question_count, 2);
    assert_eq!(geo_summary.question_count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_quiz_leaves_questions(pool: PgPool) {
    let quiz = QuizRepo::create(&pool, &new_quiz("Temporary")).await.unwrap();
    let question = QuestionRepo::create(&pool, quiz.id, &single_choice("Stay?"))
        .await
        .unwrap()
        .unwrap();

    assert!(QuizRepo::delete(&pool, quiz.id).await.unwrap());
    assert!(!QuizRepo::delete(&pool, quiz.id).await.unwrap());

    let orphan = QuestionRepo::find_detail_by_id(&pool, question.question.id)
        .await
        .unwrap()
        .expect("question should survive quiz deletion");
    assert_eq!(orphan.question.question.quiz_id, quiz.id);
    assert!(orphan.quiz_title.is_none());
}

// ---------------------------------------------------------------------------
// Test: Question CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_question_for_missing_quiz_returns_none(pool: PgPool) {
    let created = QuestionRepo::create(&pool, 424242, &single_choice("Lost?"))
        .await
        .unwrap();
    assert!(created.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_questions_keep_insertion_order(pool: PgPool) {
    let quiz = QuizRepo::create(&pool, &new_quiz("Order")).await.unwrap();

    let mut ids = Vec::new();
    for text in ["first", "second", "third"] {
        let q = QuestionRepo::create(&pool, quiz.id, &single_choice(text))
            .await
            .unwrap()
            .unwrap();
        ids.push(q.question.id);
    }

    assert_eq!(QuizRepo::question_ids(&pool, quiz.id).await.unwrap(), ids);

    let listed = QuestionRepo::list_for_quiz(&pool, quiz.id).await.unwrap();
    let texts: Vec<_> = listed.iter().map(|q| q.question.text.as_str()).collect();
    assert_eq!(texts, ["first", "second", "third"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_options_persist_in_order_with_flags(pool: PgPool) {
    let quiz = QuizRepo::create(&pool, &new_quiz("Options")).await.unwrap();
    let created = QuestionRepo::create(&pool, quiz.id, &single_choice("Pick B"))
        .await
        .unwrap()
        .unwrap();

    let fetched = QuestionRepo::find_by_id_with_options(&pool, created.question.id)
        .await
        .unwrap()
        .unwrap();
    let texts: Vec<_> = fetched.options.iter().map(|o| o.text.as_str()).collect();
    assert_eq!(texts, ["A", "B", "C"]);
    assert_eq!(
        fetched.options.iter().filter(|o| o.is_correct).count(),
        1
    );
    assert_eq!(fetched.question.question_type, "single");
    assert_eq!(fetched.question.marks, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_text_question_round_trips_to_draft(pool: PgPool) {
    let quiz = QuizRepo::create(&pool, &new_quiz("Capitals")).await.unwrap();
    let draft = free_text("Capital of France?", "Paris");
    let created = QuestionRepo::create(&pool, quiz.id, &draft)
        .await
        .unwrap()
        .unwrap();

    assert!(created.options.is_empty());
    let restored = created.to_draft().unwrap();
    assert_eq!(restored.question_type, QuestionType::Text);
    assert_eq!(restored.correct_text_answer.as_deref(), Some("Paris"));
    assert_eq!(restored.hint, "Think about Europe");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_keeps_options_unless_replaced(pool: PgPool) {
    let quiz = QuizRepo::create(&pool, &new_quiz("Update")).await.unwrap();
    let created = QuestionRepo::create(&pool, quiz.id, &single_choice("Old text"))
        .await
        .unwrap()
        .unwrap();
    let id = created.question.id;
    let original_option_ids: Vec<_> = created.options.iter().map(|o| o.id).collect();

    let mut draft = created.to_draft().unwrap();
    draft.text = "New text".to_string();
    let updated = QuestionRepo::update(&pool, id, &draft, false)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.question.text, "New text");
    assert_eq!(updated.question.quiz_id, quiz.id);
    let kept_ids: Vec<_> = updated.options.iter().map(|o| o.id).collect();
    assert_eq!(kept_ids, original_option_ids);

    draft.options.truncate(2);
    let replaced = QuestionRepo::update(&pool, id, &draft, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(replaced.options.len(), 2);
    assert!(replaced
        .options
        .iter()
        .all(|o| !original_option_ids.contains(&o.id)));

    assert!(QuestionRepo::update(&pool, id + 1000, &draft, false)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_question_removes_it_from_quiz(pool: PgPool) {
    let quiz = QuizRepo::create(&pool, &new_quiz("Delete")).await.unwrap();
    let keep = QuestionRepo::create(&pool, quiz.id, &single_choice("keep"))
        .await
        .unwrap()
        .unwrap();
    let drop = QuestionRepo::create(&pool, quiz.id, &single_choice("drop"))
        .await
        .unwrap()
        .unwrap();

    assert!(QuestionRepo::delete(&pool, drop.question.id).await.unwrap());
    assert!(!QuestionRepo::delete(&pool, drop.question.id).await.unwrap());

    assert_eq!(
        QuizRepo::question_ids(&pool, quiz.id).await.unwrap(),
        vec![keep.question.id]
    );
    let orphaned_options = QuestionRepo::options_for(&pool, &[drop.question.id])
        .await
        .unwrap();
    assert!(orphaned_options.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_after_delete_stays_last(pool: PgPool) {
    let quiz = QuizRepo::create(&pool, &new_quiz("Positions")).await.unwrap();
    let first = QuestionRepo::create(&pool, quiz.id, &single_choice("one"))
        .await
        .unwrap()
        .unwrap();
    let second = QuestionRepo::create(&pool, quiz.id, &single_choice("two"))
        .await
        .unwrap()
        .unwrap();
    QuestionRepo::delete(&pool, first.question.id).await.unwrap();
    let third = QuestionRepo::create(&pool, quiz.id, &single_choice("three"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        QuizRepo::question_ids(&pool, quiz.id).await.unwrap(),
        vec![second.question.id, third.question.id]
    );
}
