//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` entity structs matching the database rows
//! - Enriched read shapes assembled by the repositories
//! - Input DTOs consumed by the repositories

pub mod question;
pub mod quiz;
