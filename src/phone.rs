//! Phone number normalization
//!
//! Converts user-entered numbers into the provider's canonical subscriber
//! identifier (international format, digits only). Real-world input mixes
//! local trunk-prefixed numbers with already-international ones; the
//! normalizer must leave correct numbers untouched.

use crate::error::{GatewayError, GatewayResult};

/// Country calling code prepended to local numbers
pub const COUNTRY_CODE: &str = "250";

/// Leading trunk digit of locally formatted numbers
const TRUNK_PREFIX: char = '0';

/// Leading digit of a bare 9-digit subscriber number
const SUBSCRIBER_LEADING_DIGIT: char = '7';

/// Trunk prefix plus 9 subscriber digits
const LOCAL_LENGTH: usize = 10;

const SUBSCRIBER_LENGTH: usize = 9;

const MIN_MSISDN_LENGTH: usize = 9;
const MAX_MSISDN_LENGTH: usize = 15;

/// Normalize a raw phone number into the provider's subscriber format.
///
/// Deterministic, no I/O, idempotent on already-normalized input.
pub fn normalize(raw: &str) -> GatewayResult<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let candidate = if digits.len() == LOCAL_LENGTH && digits.starts_with(TRUNK_PREFIX) {
        // "0788123456" -> "250788123456"
        format!("{COUNTRY_CODE}{}", &digits[1..])
    } else if digits.len() == SUBSCRIBER_LENGTH && digits.starts_with(SUBSCRIBER_LEADING_DIGIT) {
        // "788123456" -> "250788123456"
        format!("{COUNTRY_CODE}{digits}")
    } else {
        digits
    };

    if (MIN_MSISDN_LENGTH..=MAX_MSISDN_LENGTH).contains(&candidate.len()) {
        Ok(candidate)
    } else {
        Err(GatewayError::InvalidPhoneNumber {
            raw: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trunk_prefixed_number_gets_country_code() {
        assert_eq!(normalize("0788123456").unwrap(), "250788123456");
    }

    #[test]
    fn bare_subscriber_number_gets_country_code() {
        assert_eq!(normalize("788123456").unwrap(), "250788123456");
    }

    #[test]
    fn formatting_characters_are_stripped() {
        assert_eq!(normalize("078-812-3456").unwrap(), "250788123456");
        assert_eq!(normalize("(078) 812 3456").unwrap(), "250788123456");
        assert_eq!(normalize("+250 788 123 456").unwrap(), "250788123456");
    }

    #[test]
    fn already_international_number_is_unchanged() {
        assert_eq!(normalize("250788123456").unwrap(), "250788123456");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("0788123456").unwrap();
        let twice = normalize(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn too_short_is_rejected_with_raw_input() {
        let err = normalize("12345").unwrap_err();
        match err {
            GatewayError::InvalidPhoneNumber { raw } => assert_eq!(raw, "12345"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn too_long_is_rejected() {
        assert!(normalize("1234567890123456").is_err());
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        assert!(normalize("not a number").is_err());
        assert!(normalize("").is_err());
    }

    #[test]
    fn nine_digits_without_expected_leading_digit_pass_through() {
        // No trunk rewrite applies; still a valid 9-digit identifier
        assert_eq!(normalize("612345678").unwrap(), "612345678");
    }
}
