//! Question types, field limits and record invariants.
//!
//! A question is checked in two passes before it is persisted. The type
//! invariants (options versus reference answer, number of correct options)
//! run first, then the declarative field rules on [`QuestionDraft`]. The
//! first violated rule is reported as a [`CoreError::Validation`] carrying
//! the rule's own message.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length for question text.
pub const MAX_TEXT_LENGTH: usize = 300;

/// Maximum length for the reference answer of a free-text question.
pub const MAX_TEXT_ANSWER_LENGTH: usize = 300;

/// Maximum length for a hint.
pub const MAX_HINT_LENGTH: usize = 200;

/// Marks awarded when none are supplied.
pub const DEFAULT_MARKS: i32 = 1;

/// All valid question type tags.
pub const VALID_QUESTION_TYPES: &[&str] = &["single", "multiple", "text"];

/* --------------------------------------------------------------------------
Question type
-------------------------------------------------------------------------- */

/// How a question is answered and graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Exactly one correct option.
    Single,
    /// One or more correct options; all of them must be selected.
    Multiple,
    /// Free text compared against a reference answer.
    Text,
}

impl QuestionType {
    /// The tag stored in the database and used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Single => "single",
            QuestionType::Multiple => "multiple",
            QuestionType::Text => "text",
        }
    }

    /// Whether answers are given by selecting options.
    pub fn is_choice(self) -> bool {
        !matches!(self, QuestionType::Text)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(QuestionType::Single),
            "multiple" => Ok(QuestionType::Multiple),
            "text" => Ok(QuestionType::Text),
            other => Err(CoreError::Validation(format!(
                "Invalid question type '{other}'. Must be one of: {}",
                VALID_QUESTION_TYPES.join(", ")
            ))),
        }
    }
}

/* --------------------------------------------------------------------------
Draft records
-------------------------------------------------------------------------- */

/// An answer option as it will be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDraft {
    pub text: String,
    pub is_correct: bool,
}

/// A fully assembled question, ready to be checked and persisted.
#[derive(Debug, Clone, Validate)]
pub struct QuestionDraft {
    #[validate(length(
        min = 1,
        max = 300,
        message = "Question text is required and cannot exceed 300 characters"
    ))]
    pub text: String,

    pub question_type: QuestionType,

    pub options: Vec<OptionDraft>,

    #[validate(length(max = 300, message = "Text answer cannot exceed 300 characters"))]
    pub correct_text_answer: Option<String>,

    #[validate(length(max = 200, message = "Hint cannot exceed 200 characters"))]
    pub hint: String,

    #[validate(range(min = 1, message = "Marks must be at least 1"))]
    pub marks: i32,
}

impl QuestionDraft {
    /// Drop whichever answer representation the question type does not use.
    ///
    /// Free-text questions never keep options; choice questions never keep
    /// a reference text answer.
    pub fn shaped_for_type(mut self) -> Self {
        if self.question_type.is_choice() {
            self.correct_text_answer = None;
        } else {
            self.options.clear();
        }
        self
    }

    /// Number of options flagged as correct.
    pub fn correct_option_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }
}

/* --------------------------------------------------------------------------
Validation
-------------------------------------------------------------------------- */

/// Check every question rule, type invariants first, then field limits.
pub fn validate_question(draft: &QuestionDraft) -> Result<(), CoreError> {
    validate_type_invariants(draft)?;
    draft
        .validate()
        .map_err(|errors| CoreError::Validation(first_error_message(&errors)))
}

/// Rules that depend on the question type.
pub fn validate_type_invariants(draft: &QuestionDraft) -> Result<(), CoreError> {
    match draft.question_type {
        QuestionType::Text => {
            if !draft.options.is_empty() {
                return Err(invalid("Text-based questions should not have options"));
            }
            let answer = draft.correct_text_answer.as_deref().unwrap_or_default();
            if answer.is_empty() {
                return Err(invalid("Text-based questions must have a correct answer"));
            }
            if answer.chars().count() > MAX_TEXT_ANSWER_LENGTH {
                return Err(invalid("Text answer cannot exceed 300 characters"));
            }
        }
        QuestionType::Single | QuestionType::Multiple => {
            if draft.options.is_empty() {
                return Err(invalid(
                    "Single/Multiple choice questions must have options",
                ));
            }
            if draft.options.iter().any(|o| o.text.trim().is_empty()) {
                return Err(invalid("All options must have text"));
            }
        }
    }

    let correct = draft.correct_option_count();
    match draft.question_type {
        QuestionType::Single if correct != 1 => Err(invalid(
            "Single choice questions must have exactly 1 correct option",
        )),
        QuestionType::Multiple if correct < 1 => Err(invalid(
            "Multiple choice questions must have at least 1 correct option",
        )),
        _ => Ok(()),
    }
}

fn invalid(msg: &str) -> CoreError {
    CoreError::Validation(msg.to_string())
}

/// Pick a deterministic message out of a `validator` error set.
///
/// Fields are visited in name order so the same draft always reports the
/// same rule.
fn first_error_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, errs) in fields {
        if let Some(err) = errs.first() {
            return match &err.message {
                Some(msg) => msg.to_string(),
                None => format!("Field '{field}' is invalid"),
            };
        }
    }

    "Question is invalid".to_string()
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
