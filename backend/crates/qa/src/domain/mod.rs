//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Question and its vote transitions)
//! - Domain value objects (SessionId, QuestionText, typed ids)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
