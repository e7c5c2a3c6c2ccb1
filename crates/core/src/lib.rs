//! Domain logic for the quiz service.
//!
//! Everything here is pure: no database access, no HTTP. The `db` and `api`
//! crates call into these modules to enforce record rules and to grade
//! submissions.

pub mod error;
pub mod grading;
pub mod question;
pub mod quiz;
pub mod types;
