//! Quiz title rules.

use crate::error::CoreError;

/// Maximum length of a quiz title, counted in characters after trimming.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Trim a raw quiz title and check it against the title rules.
///
/// Returns the trimmed title that should be persisted.
pub fn normalize_title(raw: Option<&str>) -> Result<String, CoreError> {
    let title = raw.map(str::trim).unwrap_or_default();

    if title.is_empty() {
        return Err(CoreError::Validation(
            "Title is required to create the quiz".to_string(),
        ));
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }

    Ok(title.to_string())
}
