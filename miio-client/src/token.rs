//! Device auth token

use std::fmt;

use serde::Deserialize;

use crate::MiioError;

/// Length of a miIO auth token in characters
pub const TOKEN_LENGTH: usize = 32;

/// Number of leading characters shown when a token is logged
const VISIBLE_PREFIX: usize = 5;

/// A validated miIO auth token
///
/// The token is exactly 32 characters long. `Debug` and `Display` only ever
/// show the redacted form so it can be logged without leaking the secret.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Token(String);

impl Token {
    /// Validate and wrap a raw token string
    pub fn parse(raw: &str) -> Result<Self, MiioError> {
        let len = raw.chars().count();
        if len != TOKEN_LENGTH {
            return Err(MiioError::InvalidToken(format!(
                "expected {} characters, got {}",
                TOKEN_LENGTH, len
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// The full secret, for handing to a transport implementation
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First few characters followed by `...`
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(VISIBLE_PREFIX).collect();
        format!("{}...", prefix)
    }
}

impl TryFrom<String> for Token {
    type Error = MiioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&self.redacted()).finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}
