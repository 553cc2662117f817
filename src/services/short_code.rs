use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

/// Character set for generated short codes, without look-alikes (0/O, 1/l/I).
const ALPHABET_CHARS: &[char] = &[
    '2', '3', '4', '5', '6', '7', '8', '9',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M',
    'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Shortest accepted code
pub const MIN_CODE_LENGTH: usize = 5;

/// Longest accepted code
pub const MAX_CODE_LENGTH: usize = 10;

/// Prefix owned by the API routes; a code starting with it could never resolve
pub const RESERVED_PREFIX: &str = "api";

static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]{5,10}$").expect("short code pattern is valid")
});

/// Service for generating and validating short codes.
pub struct ShortCodeService;

impl ShortCodeService {
    /// Generate a short code that `is_taken` does not reject.
    ///
    /// # Arguments
    ///
    /// * `length` - The desired length of the short code
    /// * `max_attempts` - Maximum number of attempts to generate a unique code
    /// * `is_taken` - Returns true when a candidate is already in use
    ///
    /// # Errors
    ///
    /// Returns `AppError::ShortCodeGenerationFailed` if unable to generate a unique
    /// code within the specified number of attempts.
    pub fn generate_unique<F>(length: usize, max_attempts: u32, is_taken: F) -> AppResult<String>
    where
        F: Fn(&str) -> bool,
    {
        for _ in 0..max_attempts {
            let code = nanoid::nanoid!(length, ALPHABET_CHARS);

            if !Self::is_reserved(&code) && !is_taken(&code) {
                return Ok(code);
            }
        }

        Err(AppError::ShortCodeGenerationFailed)
    }

    /// Check that a user-supplied code is 5-10 ASCII alphanumerics
    pub fn is_valid(code: &str) -> bool {
        CODE_REGEX.is_match(code)
    }

    /// Whether a code collides with the paths served by the API
    pub fn is_reserved(code: &str) -> bool {
        code.starts_with(RESERVED_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_chars_unique() {
        let unique: std::collections::HashSet<_> = ALPHABET_CHARS.iter().collect();
        assert_eq!(unique.len(), ALPHABET_CHARS.len());
    }

    #[test]
    fn test_alphabet_has_no_ambiguous_chars() {
        for c in ['0', 'O', '1', 'l', 'I'] {
            assert!(!ALPHABET_CHARS.contains(&c), "{} should be excluded", c);
        }
    }

    #[test]
    fn test_generated_codes_are_valid() {
        for _ in 0..100 {
            let code = ShortCodeService::generate_unique(8, 1, |_| false).unwrap();
            assert_eq!(code.len(), 8);
            assert!(ShortCodeService::is_valid(&code));
        }
    }

    #[test]
    fn test_generation_gives_up_when_everything_is_taken() {
        let result = ShortCodeService::generate_unique(8, 3, |_| true);
        assert!(matches!(result, Err(AppError::ShortCodeGenerationFailed)));
    }

    #[test]
    fn test_code_validation() {
        assert!(ShortCodeService::is_valid("abc12"));
        assert!(ShortCodeService::is_valid("ABCDEFGHIJ"));
        assert!(!ShortCodeService::is_valid("ab"));
        assert!(!ShortCodeService::is_valid("abcdefghijk"));
        assert!(!ShortCodeService::is_valid("abc-123"));
        assert!(!ShortCodeService::is_valid("abc_123"));
        assert!(!ShortCodeService::is_valid("héllo1"));
    }

    #[test]
    fn test_reserved_codes() {
        assert!(ShortCodeService::is_reserved("api12"));
        assert!(ShortCodeService::is_reserved("apiXYZ"));
        assert!(!ShortCodeService::is_reserved("apple"));
        assert!(!ShortCodeService::is_reserved("Api12"));
    }

    #[test]
    fn test_generation_skips_reserved_codes() {
        let result = ShortCodeService::generate_unique(5, 200, |_| false);
        assert!(!ShortCodeService::is_reserved(&result.unwrap()));
    }
}
