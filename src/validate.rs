//! Name field validation
//!
//! Accepts realistic multi-cultural names (hyphenated, apostrophes, interior
//! spaces, any Unicode letter) while rejecting numerals, punctuation, and
//! injection artifacts.

use thiserror::Error;

/// Maximum name field length in Unicode code points.
const MAX_NAME_LEN: usize = 100;

/// Validation failure for a single name field. The label identifies the
/// field in user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{0} is too long (max 100 characters)")]
    TooLong(&'static str),

    #[error("{0} cannot start or end with special characters")]
    EdgeSpecial(&'static str),

    #[error("{0} cannot have consecutive special characters")]
    ConsecutiveSpecial(&'static str),

    #[error("{0} contains invalid characters - only letters, spaces, hyphens and apostrophes are allowed")]
    InvalidChar(&'static str),
}

fn is_special(c: char) -> bool {
    c == ' ' || c == '-' || c == '\''
}

/// Validate a single name field.
///
/// Checks run in order: emptiness (required fields only), code point count,
/// then a per-code-point scan. Space, hyphen, and apostrophe are allowed only
/// between letters, never at either end and never next to another special
/// character.
pub fn validate_field(
    label: &'static str,
    value: &str,
    required: bool,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        if required {
            return Err(ValidationError::Empty(label));
        }
        return Ok(());
    }

    let chars: Vec<char> = value.chars().collect();
    if chars.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong(label));
    }

    let mut prev_special = false;
    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphabetic() {
            prev_special = false;
        } else if is_special(c) {
            if i == 0 || i == chars.len() - 1 {
                return Err(ValidationError::EdgeSpecial(label));
            }
            if prev_special {
                return Err(ValidationError::ConsecutiveSpecial(label));
            }
            prev_special = true;
        } else {
            return Err(ValidationError::InvalidChar(label));
        }
    }

    Ok(())
}

/// Validate the three name fields of a creation payload.
///
/// `name` and `surname` are required, `patronymic` is optional.
pub fn validate_all_names(
    name: &str,
    surname: &str,
    patronymic: &str,
) -> Result<(), ValidationError> {
    validate_field("first name", name, true)?;
    validate_field("last name", surname, true)?;
    validate_field("patronymic", patronymic, false)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_accepted() {
        assert!(validate_all_names("Dmitriy", "Ushakov", "").is_ok());
        assert!(validate_all_names("Anna", "Karenina", "Arkadyevna").is_ok());
    }

    #[test]
    fn test_unicode_letters_accepted() {
        assert!(validate_field("first name", "Дмитрий", true).is_ok());
        assert!(validate_field("first name", "José", true).is_ok());
        assert!(validate_field("first name", "李", true).is_ok());
    }

    #[test]
    fn test_interior_specials_accepted() {
        assert!(validate_field("last name", "O'Brien", true).is_ok());
        assert!(validate_field("last name", "Smith-Jones", true).is_ok());
        assert!(validate_field("last name", "van der Berg", true).is_ok());
    }

    #[test]
    fn test_digits_rejected() {
        assert_eq!(
            validate_field("first name", "An7a", true),
            Err(ValidationError::InvalidChar("first name"))
        );
    }

    #[test]
    fn test_punctuation_rejected() {
        assert_eq!(
            validate_field("first name", "Ivan;DROP", true),
            Err(ValidationError::InvalidChar("first name"))
        );
    }

    #[test]
    fn test_leading_special_rejected() {
        assert_eq!(
            validate_field("first name", "-Ivan", true),
            Err(ValidationError::EdgeSpecial("first name"))
        );
        assert_eq!(
            validate_field("first name", "'Ivan", true),
            Err(ValidationError::EdgeSpecial("first name"))
        );
    }

    #[test]
    fn test_trailing_special_rejected() {
        assert_eq!(
            validate_field("last name", "Petrov-", true),
            Err(ValidationError::EdgeSpecial("last name"))
        );
    }

    #[test]
    fn test_consecutive_specials_rejected() {
        assert_eq!(
            validate_field("last name", "Smith--Jones", true),
            Err(ValidationError::ConsecutiveSpecial("last name"))
        );
        // Mixed specials are just as invalid as repeated ones
        assert_eq!(
            validate_field("last name", "O'-Brien", true),
            Err(ValidationError::ConsecutiveSpecial("last name"))
        );
    }

    #[test]
    fn test_length_boundary() {
        let exactly_100: String = "a".repeat(100);
        assert!(validate_field("first name", &exactly_100, true).is_ok());

        let too_long: String = "a".repeat(101);
        assert_eq!(
            validate_field("first name", &too_long, true),
            Err(ValidationError::TooLong("first name"))
        );
    }

    #[test]
    fn test_length_counts_code_points_not_bytes() {
        // 100 Cyrillic letters are 200 bytes but still within the limit
        let cyrillic: String = "д".repeat(100);
        assert!(validate_field("first name", &cyrillic, true).is_ok());
    }

    #[test]
    fn test_required_empty_rejected() {
        assert_eq!(
            validate_field("first name", "", true),
            Err(ValidationError::Empty("first name"))
        );
        assert_eq!(
            validate_field("first name", "   ", true),
            Err(ValidationError::Empty("first name"))
        );
    }

    #[test]
    fn test_optional_empty_accepted() {
        assert!(validate_field("patronymic", "", false).is_ok());
        assert!(validate_field("patronymic", "  ", false).is_ok());
    }

    #[test]
    fn test_error_message_includes_label() {
        let err = validate_field("patronymic", "Pav7ovna", false).unwrap_err();
        assert!(err.to_string().starts_with("patronymic"));
    }
}
