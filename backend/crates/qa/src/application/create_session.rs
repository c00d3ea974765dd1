//! Create Session Use Case

use crate::domain::repository::SessionRepository;
use crate::domain::value_objects::SessionId;
use crate::error::QaResult;
use std::sync::Arc;

/// Create Session Use Case
pub struct CreateSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> CreateSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Generate a fresh id and materialise its container
    ///
    /// No uniqueness check is made against existing sessions.
    pub async fn execute(&self) -> QaResult<SessionId> {
        let session_id = SessionId::generate();

        self.session_repo.create_session(&session_id).await?;

        tracing::info!(session_id = %session_id, "Created session");

        Ok(session_id)
    }
}
