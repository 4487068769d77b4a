use super::ValidationError;

/// Checks the character count of an already-trimmed value.
///
/// An empty value with a positive minimum reports `Required` rather than
/// `TooShort`.
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let count = value.chars().count();

    if count == 0 && min > 0 {
        return Err(ValidationError::Required);
    }
    if count < min {
        return Err(if max == usize::MAX {
            ValidationError::TooShort { min }
        } else {
            ValidationError::OutOfRange { min, max }
        });
    }
    if count > max {
        return Err(if min <= 1 {
            ValidationError::TooLong { max }
        } else {
            ValidationError::OutOfRange { min, max }
        });
    }

    Ok(())
}
