//! HTTP Handlers

use crate::application::add_question::{AddQuestionInput, AddQuestionUseCase};
use crate::application::create_session::CreateSessionUseCase;
use crate::application::delete_question::DeleteQuestionUseCase;
use crate::application::list_questions::ListQuestionsUseCase;
use crate::application::vote::{VoteInput, VoteUseCase};
use crate::domain::repository::{QuestionRepository, SessionRepository};
use crate::error::QaResult;
use crate::presentation::dto::{
    AddQuestionRequest, AddQuestionResponse, CreateSessionResponse, QuestionsResponse,
    VoteRequest, VoteResponse, decode_body, questions_response,
};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

/// Shared state for Q&A handlers
pub struct QaAppState<R>
where
    R: SessionRepository + QuestionRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> Clone for QaAppState<R>
where
    R: SessionRepository + QuestionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

/// POST /sessions
pub async fn create_session<R>(
    State(state): State<QaAppState<R>>,
) -> QaResult<Json<CreateSessionResponse>>
where
    R: SessionRepository + QuestionRepository + Send + Sync + 'static,
{
    let use_case = CreateSessionUseCase::new(state.repo.clone());

    let session_id = use_case.execute().await?;

    Ok(Json(CreateSessionResponse { session_id }))
}

/// GET /questions/{sessionId}
pub async fn list_questions<R>(
    State(state): State<QaAppState<R>>,
    Path(session_id): Path<String>,
) -> QaResult<Json<QuestionsResponse>>
where
    R: SessionRepository + QuestionRepository + Send + Sync + 'static,
{
    let use_case = ListQuestionsUseCase::new(state.repo.clone());

    let questions = use_case.execute(Some(session_id.as_str())).await?;

    Ok(Json(questions_response(questions)))
}

/// POST /questions/{sessionId}
pub async fn add_question<R>(
    State(state): State<QaAppState<R>>,
    Path(session_id): Path<String>,
    body: Bytes,
) -> QaResult<Json<AddQuestionResponse>>
where
    R: SessionRepository + QuestionRepository + Send + Sync + 'static,
{
    let req: AddQuestionRequest = decode_body(&body)?;
    let use_case = AddQuestionUseCase::new(state.repo.clone());

    let input = AddQuestionInput {
        session_id: Some(session_id),
        question: req.question,
        user_id: req.user_id,
    };

    let question_id = use_case.execute(input).await?;

    Ok(Json(AddQuestionResponse { question_id }))
}

/// DELETE /questions/{sessionId}/{questionId}
pub async fn delete_question<R>(
    State(state): State<QaAppState<R>>,
    Path((session_id, question_id)): Path<(String, String)>,
) -> QaResult<StatusCode>
where
    R: SessionRepository + QuestionRepository + Send + Sync + 'static,
{
    let use_case = DeleteQuestionUseCase::new(state.repo.clone());

    use_case
        .execute(Some(session_id.as_str()), Some(question_id.as_str()))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /questions/upvote/{sessionId}/{questionId}
pub async fn upvote<R>(
    State(state): State<QaAppState<R>>,
    Path((session_id, question_id)): Path<(String, String)>,
    body: Bytes,
) -> QaResult<Json<VoteResponse>>
where
    R: SessionRepository + QuestionRepository + Send + Sync + 'static,
{
    let req: VoteRequest = decode_body(&body)?;
    let use_case = VoteUseCase::new(state.repo.clone());

    let success = use_case
        .upvote(vote_input(session_id, question_id, req))
        .await?;

    Ok(Json(VoteResponse { success }))
}

/// PATCH /questions/downvote/{sessionId}/{questionId}
pub async fn downvote<R>(
    State(state): State<QaAppState<R>>,
    Path((session_id, question_id)): Path<(String, String)>,
    body: Bytes,
) -> QaResult<Json<VoteResponse>>
where
    R: SessionRepository + QuestionRepository + Send + Sync + 'static,
{
    let req: VoteRequest = decode_body(&body)?;
    let use_case = VoteUseCase::new(state.repo.clone());

    let success = use_case
        .downvote(vote_input(session_id, question_id, req))
        .await?;

    Ok(Json(VoteResponse { success }))
}

fn vote_input(session_id: String, question_id: String, req: VoteRequest) -> VoteInput {
    VoteInput {
        session_id: Some(session_id),
        question_id: Some(question_id),
        user_id: req.user_id,
    }
}
