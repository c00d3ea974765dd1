//! Domain Value Objects
//!
//! Immutable, validated value types for the Q&A domain.

use std::fmt;

use kernel::id::Id;
use serde::Serialize;

use crate::error::{QaError, QaResult};

pub use kernel::id::{QuestionId, UserId};

/// Session identifier: exactly six characters from `[A-Z0-9]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub const LEN: usize = 6;
    const FRAGMENT_LEN: usize = 3;

    /// Generate a fresh id from two independently drawn three-character fragments
    pub fn generate() -> Self {
        let mut id = platform::random::random_code(Self::FRAGMENT_LEN);
        id.push_str(&platform::random::random_code(Self::FRAGMENT_LEN));
        Self(id)
    }

    /// Validate a caller-supplied session id
    pub fn parse(raw: Option<&str>) -> QaResult<Self> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(QaError::EmptySessionId),
        };

        let well_formed = raw.len() == Self::LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if !well_formed {
            return Err(QaError::InvalidSessionId);
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Question text admitted into a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionText(String);

impl QuestionText {
    pub const MIN_CHARS: usize = 20;
    pub const MAX_CHARS: usize = 150;

    /// Validate question text: non-empty, 20..=150 characters, contains `?`
    pub fn parse(raw: Option<&str>) -> QaResult<Self> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(QaError::EmptyQuestion),
        };

        let chars = raw.chars().count();
        if !(Self::MIN_CHARS..=Self::MAX_CHARS).contains(&chars) {
            return Err(QaError::QuestionLength {
                min: Self::MIN_CHARS,
                max: Self::MAX_CHARS,
            });
        }

        if !raw.contains('?') {
            return Err(QaError::MissingQuestionMark);
        }

        Ok(Self(raw.to_string()))
    }

    /// Wrap text read back from the store, which was validated on the way in
    pub fn from_stored(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_question_id(raw: Option<&str>) -> QaResult<QuestionId> {
    Id::parse(raw).map_err(|_| QaError::EmptyQuestionId)
}

pub fn parse_user_id(raw: Option<&str>) -> QaResult<UserId> {
    Id::parse(raw).map_err(|_| QaError::EmptyUserId)
}
