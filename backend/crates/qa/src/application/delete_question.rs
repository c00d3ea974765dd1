//! Delete Question Use Case

use crate::domain::repository::QuestionRepository;
use crate::domain::value_objects::{SessionId, parse_question_id};
use crate::error::QaResult;
use std::sync::Arc;

/// Delete Question Use Case
pub struct DeleteQuestionUseCase<Q>
where
    Q: QuestionRepository,
{
    question_repo: Arc<Q>,
}

impl<Q> DeleteQuestionUseCase<Q>
where
    Q: QuestionRepository,
{
    pub fn new(question_repo: Arc<Q>) -> Self {
        Self { question_repo }
    }

    /// Remove a question; unknown ids succeed without a prior read
    pub async fn execute(&self, session_id: Option<&str>, question_id: Option<&str>) -> QaResult<()> {
        let session_id = SessionId::parse(session_id)?;
        let question_id = parse_question_id(question_id)?;

        self.question_repo.delete(&session_id, &question_id).await?;

        tracing::info!(
            session_id = %session_id,
            question_id = %question_id,
            "Deleted question"
        );

        Ok(())
    }
}
