//! Player ID - validated remote statistics API player identifier

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Remote statistics API player id
///
/// Always trimmed, non-empty, and never a placeholder (registration stores
/// `temp_<n>` until the real id is linked).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    /// Prefix used by account registration for not-yet-linked ids
    pub const PLACEHOLDER_PREFIX: &'static str = "temp_";

    /// Maximum accepted length
    pub const MAX_LEN: usize = 64;

    /// Parse and validate a raw id
    pub fn parse(raw: &str) -> Result<Self, PlayerIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PlayerIdError::Empty);
        }
        if Self::is_placeholder(trimmed) {
            return Err(PlayerIdError::Placeholder(trimmed.to_string()));
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(PlayerIdError::TooLong { max: Self::MAX_LEN });
        }
        if trimmed.contains(['/', '?', '#']) || trimmed.chars().any(char::is_whitespace) {
            return Err(PlayerIdError::InvalidCharacters(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Check whether a raw id is a registration placeholder
    #[inline]
    pub fn is_placeholder(raw: &str) -> bool {
        raw.trim().starts_with(Self::PLACEHOLDER_PREFIX)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Error when validating a player id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerIdError {
    #[error("player id is empty")]
    Empty,

    #[error("player id is a placeholder: {0}")]
    Placeholder(String),

    #[error("player id too long: max {max} characters")]
    TooLong { max: usize },

    #[error("player id contains invalid characters: {0}")]
    InvalidCharacters(String),
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PlayerId {
    type Err = PlayerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PlayerId {
    type Error = PlayerIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl AsRef<str> for PlayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for PlayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
