//! Document Store Abstraction
//!
//! A path-addressed JSON document store with four operations
//! (`get`, `post`, `patch`, `delete`), modelled on the Firebase
//! Realtime Database REST API. Paths are sequences of keys; the
//! concrete backend decides how a path maps onto the wire.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reaching or writing the document store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Base URL cannot be used to address documents
    #[error("Invalid store base URL: {0}")]
    InvalidBaseUrl(String),

    /// Transport failure, timeout, or undecodable response body
    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Store answered with a non-success status
    #[error("Store answered {status} for {path}")]
    Status { status: u16, path: String },

    /// Write addressed below a node that is not a container
    #[error("Cannot write below non-container node at {0}")]
    NotAContainer(String),

    /// Request body has the wrong shape for the operation
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Location of a document: an ordered list of keys below the store root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path by one key
    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Path-addressed document store
#[trait_variant::make(DocumentStore: Send)]
pub trait LocalDocumentStore {
    /// Read the document at `path`; an absent document reads as `Value::Null`
    async fn get(&self, path: &DocumentPath) -> StoreResult<Value>;

    /// Append `body` as a new child of `path`; returns the generated child key
    async fn post(&self, path: &DocumentPath, body: &Value) -> StoreResult<String>;

    /// Merge the top-level fields of `body` into the document at `path`
    async fn patch(&self, path: &DocumentPath, body: &Value) -> StoreResult<()>;

    /// Remove the document at `path`; removing an absent document succeeds
    async fn delete(&self, path: &DocumentPath) -> StoreResult<()>;
}
