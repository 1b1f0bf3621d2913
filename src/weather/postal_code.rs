//! Brazilian postal code (CEP) validation.

use std::fmt;

use thiserror::Error;

/// Required number of characters in a postal code.
pub const POSTAL_CODE_LEN: usize = 8;

/// Returned when a string is not an 8-digit postal code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cep")]
pub struct InvalidPostalCode;

/// A validated postal code: exactly eight ASCII digits, kept as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Validate `raw` without trimming or reformatting it.
    pub fn parse(raw: &str) -> Result<Self, InvalidPostalCode> {
        if raw.chars().count() != POSTAL_CODE_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPostalCode);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for PostalCode {
    type Error = InvalidPostalCode;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_eight_digits() {
        let cep = PostalCode::parse("01310100").unwrap();
        assert_eq!(cep.as_str(), "01310100");
        assert_eq!(cep.to_string(), "01310100");
    }

    #[test]
    fn test_rejects_wrong_length() {
        for raw in ["", "0131010", "013101000", "1234567890123"] {
            assert_eq!(PostalCode::parse(raw), Err(InvalidPostalCode), "{raw:?}");
        }
    }

    #[test]
    fn test_rejects_non_digits_and_formatting() {
        for raw in ["0131010a", "01310-10", " 1310100", "０１３１０１００"] {
            assert!(PostalCode::parse(raw).is_err(), "{raw:?}");
        }
    }

    #[test]
    fn test_error_message() {
        assert_eq!(InvalidPostalCode.to_string(), "invalid cep");
    }
}
