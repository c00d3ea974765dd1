//! Common ID Types
//!
//! Type-safe wrappers for opaque, string-valued identifiers
//! (store-assigned question keys, caller-supplied user ids).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Returned when an identifier is absent or empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("identifier cannot be empty")]
pub struct EmptyIdError;

/// Generic typed ID wrapper around a non-empty string
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
///
/// let id = UserId::parse(Some("u1")).unwrap();
/// assert_eq!(id.as_str(), "u1");
/// assert!(UserId::parse(Some("")).is_err());
/// ```
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Parse a raw identifier; `None` and `""` are rejected
    pub fn parse(raw: Option<&str>) -> Result<Self, EmptyIdError> {
        match raw {
            Some(value) if !value.is_empty() => Ok(Self::from_trusted(value.to_string())),
            _ => Err(EmptyIdError),
        }
    }

    /// Wrap a value that is already known to be a valid key (e.g. read back from the store)
    pub fn from_trusted(value: String) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::from_trusted(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(Some(value.as_str())).map_err(serde::de::Error::custom)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for store-assigned question keys
    pub struct Question;

    /// Marker for caller-supplied user identifiers
    pub struct User;
}

/// Type aliases for common IDs
pub type QuestionId = Id<markers::Question>;
pub type UserId = Id<markers::User>;
