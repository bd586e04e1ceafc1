//! Checked activation code type.

use crate::codec;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when turning user input into an [`ActivationCode`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// The input does not normalize to 9 characters of `[A-Z0-9]`
    #[error("Malformed activation code: {0:?}")]
    Malformed(String),
}

/// A 9-character `[A-Z0-9]` activation code in its raw (storage) form.
///
/// `Display` and serde use the raw form; [`ActivationCode::formatted`] gives
/// the `XXX-XXX-XXX` form shown to people.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivationCode(String);

impl ActivationCode {
    /// Generates a fresh code from the thread-local RNG.
    pub fn generate() -> Self {
        Self(codec::generate())
    }

    /// Generates a fresh code from the given RNG.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(codec::generate_with(rng))
    }

    /// Parses human input: hyphens are dropped and letters upper-cased before
    /// the shape is checked, so `"abc-def-123"` and `"ABCDEF123"` are equal.
    pub fn parse(input: &str) -> Result<Self, CodeError> {
        let raw = codec::unformat(input.trim());
        Self::from_raw(raw)
    }

    /// Accepts an already-normalized raw code, without any normalization.
    pub fn from_raw(raw: impl Into<String>) -> Result<Self, CodeError> {
        let raw = raw.into();
        if codec::is_valid(&raw) {
            Ok(Self(raw))
        } else {
            Err(CodeError::Malformed(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `XXX-XXX-XXX` display form.
    pub fn formatted(&self) -> String {
        codec::format(&self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ActivationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ActivationCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ActivationCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_raw(value)
    }
}

impl From<ActivationCode> for String {
    fn from(code: ActivationCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ActivationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_display_form_case_insensitively() {
        let code = ActivationCode::parse("abc-def-123").unwrap();
        assert_eq!(code.as_str(), "ABCDEF123");
        assert_eq!(code.formatted(), "ABC-DEF-123");
        assert_eq!(code.to_string(), "ABCDEF123");
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let code: ActivationCode = "  ABC-DEF-123\n".parse().unwrap();
        assert_eq!(code.as_str(), "ABCDEF123");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            ActivationCode::parse("ABC-DEF"),
            Err(CodeError::Malformed("ABCDEF".to_string()))
        );
        assert!(ActivationCode::parse("ABC_DEF_123").is_err());
        assert!(ActivationCode::parse("").is_err());
    }

    #[test]
    fn from_raw_does_not_normalize() {
        assert!(ActivationCode::from_raw("abcdef123").is_err());
        assert!(ActivationCode::from_raw("ABC-DEF-123").is_err());
        assert!(ActivationCode::from_raw("ABCDEF123").is_ok());
    }

    #[test]
    fn serde_uses_raw_form_and_validates() {
        let code = ActivationCode::from_raw("ZZZ999AAA").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"ZZZ999AAA\"");

        let back: ActivationCode = serde_json::from_str("\"ZZZ999AAA\"").unwrap();
        assert_eq!(back, code);

        assert!(serde_json::from_str::<ActivationCode>("\"ZZZ-999-AAA\"").is_err());
    }

    #[test]
    fn generated_codes_are_valid() {
        let code = ActivationCode::generate();
        assert!(codec::is_valid(code.as_str()));
    }
}
