//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Random code generation (session codes, push ids)
//! - Store configuration
//! - The path-addressed document store abstraction
//! - REST (Firebase-style) and in-memory document store implementations

pub mod config;
pub mod document_store;
pub mod memory_store;
pub mod random;
pub mod rest_store;
