//! Infrastructure Layer
//!
//! Repository implementations on top of the platform document store.

pub mod document;
