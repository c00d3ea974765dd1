//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Raw caller input is validated here, in a fixed order per operation,
//! before any store access.

pub mod add_question;
pub mod create_session;
pub mod delete_question;
pub mod list_questions;
pub mod vote;
