//! API DTOs (Data Transfer Objects)
//!
//! Request fields are optional so that absent or `null` values reach domain
//! validation and produce its messages rather than a deserializer rejection.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::entities::Question;
use crate::domain::value_objects::{QuestionId, SessionId, UserId};
use crate::error::{QaError, QaResult};

/// Decode a request body regardless of its `Content-Type`
///
/// An empty body or a JSON `null` reads as a request with every field
/// absent. Anything else must deserialize into `T`.
pub fn decode_body<T>(body: &[u8]) -> QaResult<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice::<Option<T>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| QaError::MalformedBody {
            reason: e.to_string(),
        })
}

/// Response for POST /sessions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: SessionId,
}

/// Request for POST /questions/{sessionId}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response for POST /questions/{sessionId}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionResponse {
    pub question_id: QuestionId,
}

/// Request for PATCH /questions/{upvote|downvote}/{sessionId}/{questionId}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response for vote operations
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub success: bool,
}

/// One question as shown to clients, same shape as the stored document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question: String,
    pub user_id: UserId,
    pub up_votes: u64,
    pub likers: Vec<UserId>,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            up_votes: question.up_votes(),
            likers: question.likers().to_vec(),
            question: question.text.as_str().to_string(),
            user_id: question.asker,
        }
    }
}

/// Response for GET /questions/{sessionId}, keyed by question id
pub type QuestionsResponse = BTreeMap<String, QuestionResponse>;

pub fn questions_response(questions: BTreeMap<QuestionId, Question>) -> QuestionsResponse {
    questions
        .into_iter()
        .map(|(id, question)| (id.into_string(), question.into()))
        .collect()
}
