//! Shortcode generation and validation.
//!
//! Random codes are drawn uniformly from the 62-symbol alphanumeric
//! alphabet; custom user-supplied codes are validated against the same
//! character set with a wider length bound.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde_json::json;
use std::collections::HashSet;

/// Length of generated shortcodes.
pub const CODE_LENGTH: usize = 6;

/// Minimum length for a custom shortcode.
pub const MIN_CUSTOM_CODE_LENGTH: usize = 4;

/// Maximum length for any shortcode, custom or generated.
pub const MAX_CODE_LENGTH: usize = 12;

/// Redraws at one length before the generator falls back to a longer code.
///
/// The 62^6 code space vastly exceeds realistic registry sizes, so the
/// fallback is a bound on pathological stores rather than a path real
/// deployments hit.
const MAX_ATTEMPTS_PER_LENGTH: usize = 16;

/// Generates a random shortcode that does not collide with `existing`.
///
/// Draws [`CODE_LENGTH`] characters uniformly from `[A-Za-z0-9]` and redraws
/// on collision. After [`MAX_ATTEMPTS_PER_LENGTH`] consecutive collisions the
/// candidate length grows by one, up to [`MAX_CODE_LENGTH`], where it keeps
/// drawing; the returned code always satisfies the shortcode syntax rule.
pub fn generate_code(existing: &HashSet<String>) -> String {
    let mut rng = rand::rng();
    let mut length = CODE_LENGTH;

    loop {
        for _ in 0..MAX_ATTEMPTS_PER_LENGTH {
            let code: String = (&mut rng)
                .sample_iter(Alphanumeric)
                .take(length)
                .map(char::from)
                .collect();

            if !existing.contains(&code) {
                return code;
            }
        }

        if length < MAX_CODE_LENGTH {
            length += 1;
        }
    }
}

/// Validates a user-provided custom shortcode.
///
/// # Rules
///
/// - Length: 4-12 characters
/// - Allowed characters: ASCII letters and digits
///
/// # Errors
///
/// Returns [`AppError::InvalidShortcode`] if either rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < MIN_CUSTOM_CODE_LENGTH || code.len() > MAX_CODE_LENGTH {
        return Err(AppError::invalid_shortcode(
            "Custom code must be 4-12 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::invalid_shortcode(
            "Custom code can only contain letters and digits",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_has_fixed_length() {
        let code = generate_code(&HashSet::new());
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generated_code_is_alphanumeric() {
        let code = generate_code(&HashSet::new());
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_code_passes_custom_validation() {
        let code = generate_code(&HashSet::new());
        assert!(validate_custom_code(&code).is_ok());
    }

    #[test]
    fn test_generated_code_avoids_existing() {
        let mut existing = HashSet::new();
        for _ in 0..500 {
            let code = generate_code(&existing);
            assert!(!existing.contains(&code));
            existing.insert(code);
        }
        assert_eq!(existing.len(), 500);
    }

    #[test]
    fn test_generated_codes_are_spread_out() {
        let existing = HashSet::new();
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            seen.insert(generate_code(&existing));
        }
        // 1000 draws from a 5.6e10 space should essentially never collide.
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_validate_minimum_length() {
        assert!(validate_custom_code("abcd").is_ok());
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(validate_custom_code("abcdefgh1234").is_ok());
    }

    #[test]
    fn test_validate_mixed_case() {
        assert!(validate_custom_code("MyCode42").is_ok());
    }

    #[test]
    fn test_validate_only_digits() {
        assert!(validate_custom_code("123456").is_ok());
    }

    #[test]
    fn test_validate_too_short() {
        let err = validate_custom_code("ab1").unwrap_err();
        assert!(matches!(err, AppError::InvalidShortcode { .. }));
        assert!(err.to_string().contains("4-12"));
    }

    #[test]
    fn test_validate_too_long() {
        assert!(validate_custom_code("abcdefgh12345").is_err());
    }

    #[test]
    fn test_validate_hyphen_rejected() {
        assert!(validate_custom_code("my-code").is_err());
    }

    #[test]
    fn test_validate_underscore_rejected() {
        assert!(validate_custom_code("my_code").is_err());
    }

    #[test]
    fn test_validate_space_rejected() {
        assert!(validate_custom_code("my code").is_err());
    }

    #[test]
    fn test_validate_unicode_rejected() {
        assert!(validate_custom_code("cødeword").is_err());
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_custom_code("").is_err());
    }
}
