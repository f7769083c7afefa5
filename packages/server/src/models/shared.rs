use serde::Serialize;

use crate::error::AppError;

/// Empty `meta` object carried by the source envelope responses.
#[derive(Serialize, Default, utoipa::ToSchema)]
pub struct ResponseMeta {}

/// Validate a trimmed, required text field against a maximum character count.
pub fn validate_required_text(value: &str, field: &str, max: usize) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}
