//! Live Q&A Session Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Document store implementation
//! - `presentation/` - HTTP handlers
//!
//! ## Vote Model
//! - A question's likers form a set; the asker is the first liker
//! - `upVotes` always equals the number of likers
//! - The asker can never withdraw their own like

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{QaError, QaResult};
pub use infra::document::DocumentQaRepository;
pub use presentation::router::{qa_router, qa_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
