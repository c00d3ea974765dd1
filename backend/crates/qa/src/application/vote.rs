//! Vote Use Case
//!
//! Read, apply the like transition, then write `upVotes` and `likers` back
//! in one update. A rejected transition never reaches the store. The
//! read-modify-write is not atomic: two concurrent votes on the same
//! question can lose one update.

use crate::domain::entities::Question;
use crate::domain::repository::QuestionRepository;
use crate::domain::value_objects::{
    QuestionId, SessionId, UserId, parse_question_id, parse_user_id,
};
use crate::error::QaResult;
use std::sync::Arc;

/// Input DTO for upvote / downvote
#[derive(Debug, Clone, Default)]
pub struct VoteInput {
    pub session_id: Option<String>,
    pub question_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "upvote",
            Direction::Down => "downvote",
        }
    }
}

/// Vote Use Case
pub struct VoteUseCase<Q>
where
    Q: QuestionRepository,
{
    question_repo: Arc<Q>,
}

impl<Q> VoteUseCase<Q>
where
    Q: QuestionRepository,
{
    pub fn new(question_repo: Arc<Q>) -> Self {
        Self { question_repo }
    }

    pub async fn upvote(&self, input: VoteInput) -> QaResult<bool> {
        self.vote(input, Direction::Up).await
    }

    pub async fn downvote(&self, input: VoteInput) -> QaResult<bool> {
        self.vote(input, Direction::Down).await
    }

    async fn vote(&self, input: VoteInput, direction: Direction) -> QaResult<bool> {
        let (session_id, question_id, user_id) = validate(&input)?;

        let mut question = self.question_repo.get(&session_id, &question_id).await?;
        apply(&mut question, user_id.clone(), direction)?;

        self.question_repo
            .update_votes(&session_id, &question_id, &question)
            .await?;

        tracing::info!(
            session_id = %session_id,
            question_id = %question_id,
            user_id = %user_id,
            up_votes = question.up_votes(),
            direction = direction.as_str(),
            "Recorded vote"
        );

        Ok(true)
    }
}

fn validate(input: &VoteInput) -> QaResult<(SessionId, QuestionId, UserId)> {
    let session_id = SessionId::parse(input.session_id.as_deref())?;
    let question_id = parse_question_id(input.question_id.as_deref())?;
    let user_id = parse_user_id(input.user_id.as_deref())?;
    Ok((session_id, question_id, user_id))
}

fn apply(question: &mut Question, user_id: UserId, direction: Direction) -> QaResult<()> {
    match direction {
        Direction::Up => question.upvote(user_id),
        Direction::Down => question.downvote(&user_id),
    }
}
