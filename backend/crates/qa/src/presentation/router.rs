//! Q&A Router

use crate::domain::repository::{QuestionRepository, SessionRepository};
use crate::infra::document::DocumentQaRepository;
use crate::presentation::handlers::{self, QaAppState};
use axum::{
    Router,
    routing::{get, patch, post},
};
use platform::document_store::DocumentStore;
use std::sync::Arc;

/// Create the Q&A router on top of a document store
pub fn qa_router<S>(store: S) -> Router
where
    S: DocumentStore + Sync + 'static,
{
    qa_router_generic(DocumentQaRepository::new(store))
}

/// Create a generic Q&A router for any repository implementation
pub fn qa_router_generic<R>(repo: R) -> Router
where
    R: SessionRepository + QuestionRepository + Send + Sync + 'static,
{
    let state = QaAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/sessions", post(handlers::create_session::<R>))
        .route(
            "/questions/{session_id}",
            get(handlers::list_questions::<R>).post(handlers::add_question::<R>),
        )
        .route(
            "/questions/{session_id}/{question_id}",
            axum::routing::delete(handlers::delete_question::<R>),
        )
        .route(
            "/questions/upvote/{session_id}/{question_id}",
            patch(handlers::upvote::<R>),
        )
        .route(
            "/questions/downvote/{session_id}/{question_id}",
            patch(handlers::downvote::<R>),
        )
        .with_state(state)
}
