//! Add Question Use Case

use crate::domain::entities::Question;
use crate::domain::repository::QuestionRepository;
use crate::domain::value_objects::{QuestionId, QuestionText, SessionId, parse_user_id};
use crate::error::QaResult;
use std::sync::Arc;

/// Input DTO for add question
#[derive(Debug, Clone, Default)]
pub struct AddQuestionInput {
    pub session_id: Option<String>,
    pub question: Option<String>,
    pub user_id: Option<String>,
}

/// Add Question Use Case
pub struct AddQuestionUseCase<Q>
where
    Q: QuestionRepository,
{
    question_repo: Arc<Q>,
}

impl<Q> AddQuestionUseCase<Q>
where
    Q: QuestionRepository,
{
    pub fn new(question_repo: Arc<Q>) -> Self {
        Self { question_repo }
    }

    pub async fn execute(&self, input: AddQuestionInput) -> QaResult<QuestionId> {
        // Session, then text, then user
        let session_id = SessionId::parse(input.session_id.as_deref())?;
        let text = QuestionText::parse(input.question.as_deref())?;
        let asker = parse_user_id(input.user_id.as_deref())?;

        let question = Question::ask(text, asker);
        let question_id = self.question_repo.create(&session_id, &question).await?;

        tracing::info!(
            session_id = %session_id,
            question_id = %question_id,
            user_id = %question.asker,
            "Added question"
        );

        Ok(question_id)
    }
}
