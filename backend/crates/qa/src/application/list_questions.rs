//! List Questions Use Case

use crate::domain::entities::Question;
use crate::domain::repository::SessionRepository;
use crate::domain::value_objects::{QuestionId, SessionId};
use crate::error::QaResult;
use std::collections::BTreeMap;
use std::sync::Arc;

/// List Questions Use Case
pub struct ListQuestionsUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> ListQuestionsUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(
        &self,
        session_id: Option<&str>,
    ) -> QaResult<BTreeMap<QuestionId, Question>> {
        let session_id = SessionId::parse(session_id)?;

        let questions = self.session_repo.list_questions(&session_id).await?;

        tracing::debug!(
            session_id = %session_id,
            count = questions.len(),
            "Listed questions"
        );

        Ok(questions)
    }
}
