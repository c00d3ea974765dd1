//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use std::collections::BTreeMap;

use crate::domain::entities::Question;
use crate::domain::value_objects::{QuestionId, SessionId};
use crate::error::QaResult;

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Materialise an empty session container
    async fn create_session(&self, session_id: &SessionId) -> QaResult<()>;

    /// All questions of a session; empty when the session does not exist
    async fn list_questions(
        &self,
        session_id: &SessionId,
    ) -> QaResult<BTreeMap<QuestionId, Question>>;
}

/// Question repository trait
#[trait_variant::make(QuestionRepository: Send)]
pub trait LocalQuestionRepository {
    /// Store a new question; returns the store-assigned id
    async fn create(&self, session_id: &SessionId, question: &Question) -> QaResult<QuestionId>;

    /// Fetch a single question
    async fn get(&self, session_id: &SessionId, question_id: &QuestionId) -> QaResult<Question>;

    /// Write `upVotes` and `likers` back in one update
    async fn update_votes(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        question: &Question,
    ) -> QaResult<()>;

    /// Delete a question; deleting an unknown id succeeds
    async fn delete(&self, session_id: &SessionId, question_id: &QuestionId) -> QaResult<()>;
}
