//! Repository layer: one zero-sized struct per table with associated async
//! functions taking a `&PgPool`.

pub mod question_repo;
pub mod quiz_repo;

pub use question_repo::QuestionRepo;
pub use quiz_repo::QuizRepo;
