//! Grading of submitted answers against a quiz's answer key.
//!
//! Grading walks the quiz's own question list, not the submitted answers,
//! so a question nobody answered still counts towards the total and is
//! reported as incorrect. Submitted ids are compared in string form, which
//! lets clients send either JSON numbers or strings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::question::QuestionType;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Inputs
-------------------------------------------------------------------------- */

/// An option together with its correctness flag.
#[derive(Debug, Clone)]
pub struct GradableOption {
    pub id: DbId,
    pub text: String,
    pub is_correct: bool,
}

/// A stored question with its answer key.
#[derive(Debug, Clone)]
pub struct GradableQuestion {
    pub id: DbId,
    pub question_type: QuestionType,
    pub marks: i32,
    pub options: Vec<GradableOption>,
    pub correct_text_answer: Option<String>,
}

/// An id as submitted by a client, normalized to its string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawAnswerRef", into = "String")]
pub struct AnswerRef(String);

impl AnswerRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn matches(&self, id: DbId) -> bool {
        self.0 == id.to_string()
    }
}

impl From<DbId> for AnswerRef {
    fn from(id: DbId) -> Self {
        AnswerRef(id.to_string())
    }
}

impl From<&str> for AnswerRef {
    fn from(id: &str) -> Self {
        AnswerRef(id.to_string())
    }
}

impl From<AnswerRef> for String {
    fn from(value: AnswerRef) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnswerRef {
    Number(i64),
    Text(String),
}

impl From<RawAnswerRef> for AnswerRef {
    fn from(raw: RawAnswerRef) -> Self {
        match raw {
            RawAnswerRef::Number(n) => AnswerRef(n.to_string()),
            RawAnswerRef::Text(s) => AnswerRef(s),
        }
    }
}

/// One entry of a submission payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    #[serde(default)]
    pub question_id: Option<AnswerRef>,
    #[serde(default)]
    pub selected_option_ids: Option<Vec<AnswerRef>>,
    #[serde(default)]
    pub text_answer: Option<String>,
}

/* --------------------------------------------------------------------------
Outputs
-------------------------------------------------------------------------- */

/// What the client answered for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserAnswer {
    Text(String),
    Selected(Vec<String>),
}

/// A correct option as revealed after grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionKey {
    pub id: DbId,
    pub text: String,
}

/// The answer key for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Text(Option<String>),
    Options(Vec<OptionKey>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: DbId,
    pub correct: bool,
    pub user_answer: Option<UserAnswer>,
    pub correct_answer: CorrectAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub score: i64,
    pub total_marks: i64,
    pub percentage: i64,
    pub results: Vec<QuestionResult>,
}

/* --------------------------------------------------------------------------
Grading
-------------------------------------------------------------------------- */

/// Grade `answers` against `questions`, in question order.
///
/// When several answers name the same question, the first one is used.
pub fn grade(questions: &[GradableQuestion], answers: &[SubmittedAnswer]) -> GradeReport {
    let mut score: i64 = 0;
    let mut total_marks: i64 = 0;
    let mut results = Vec::with_capacity(questions.len());

    for question in questions {
        total_marks += i64::from(question.marks);

        let answer = answers.iter().find(|a| {
            a.question_id
                .as_ref()
                .is_some_and(|id| id.matches(question.id))
        });

        let Some(answer) = answer else {
            results.push(QuestionResult {
                question_id: question.id,
                correct: false,
                user_answer: None,
                correct_answer: answer_key(question),
            });
            continue;
        };

        let (correct, user_answer) = match question.question_type {
            QuestionType::Text => grade_text(question, answer),
            QuestionType::Single | QuestionType::Multiple => grade_choice(question, answer),
        };

        if correct {
            score += i64::from(question.marks);
        }

        results.push(QuestionResult {
            question_id: question.id,
            correct,
            user_answer: Some(user_answer),
            correct_answer: answer_key(question),
        });
    }

    GradeReport {
        score,
        total_marks,
        percentage: percentage(score, total_marks),
        results,
    }
}

/// `score` as a whole-number percentage of `total_marks`, rounded half up.
///
/// An empty quiz scores 0.
pub fn percentage(score: i64, total_marks: i64) -> i64 {
    if total_marks <= 0 {
        return 0;
    }
    (score as f64 * 100.0 / total_marks as f64).round() as i64
}

fn grade_text(question: &GradableQuestion, answer: &SubmittedAnswer) -> (bool, UserAnswer) {
    let submitted = answer.text_answer.clone().unwrap_or_default();
    let expected = question.correct_text_answer.as_deref().unwrap_or_default();
    let correct = submitted.trim().to_lowercase() == expected.trim().to_lowercase();
    (correct, UserAnswer::Text(submitted))
}

fn grade_choice(question: &GradableQuestion, answer: &SubmittedAnswer) -> (bool, UserAnswer) {
    let expected: BTreeSet<String> = question
        .options
        .iter()
        .filter(|o| o.is_correct)
        .map(|o| o.id.to_string())
        .collect();

    let selected: BTreeSet<String> = answer
        .selected_option_ids
        .iter()
        .flatten()
        .map(|id| id.as_str().to_string())
        .collect();

    let correct = selected == expected;
    (correct, UserAnswer::Selected(selected.into_iter().collect()))
}

fn answer_key(question: &GradableQuestion) -> CorrectAnswer {
    match question.question_type {
        QuestionType::Text => CorrectAnswer::Text(question.correct_text_answer.clone()),
        QuestionType::Single | QuestionType::Multiple => CorrectAnswer::Options(
            question
                .options
                .iter()
                .filter(|o| o.is_correct)
                .map(|o| OptionKey {
                    id: o.id,
                    text: o.text.clone(),
                })
                .collect(),
        ),
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
