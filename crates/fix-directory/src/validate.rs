use fix_core::errors::CoreError;

/// Trimmed `value`, or a validation error naming `field` when it is blank.
pub(crate) fn required(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}
