//! Document Store Repository Implementation
//!
//! Layout in the store:
//! - `/{sessionId}` - container keyed by question id
//! - `/{sessionId}/dummy` - sentinel written on creation so the container exists
//! - `/{sessionId}/{questionId}` - one [`QuestionDocument`]

use std::collections::BTreeMap;

use platform::document_store::{DocumentPath, DocumentStore};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::entities::Question;
use crate::domain::repository::{QuestionRepository, SessionRepository};
use crate::domain::value_objects::{QuestionId, QuestionText, SessionId, UserId};
use crate::error::{QaError, QaResult};

/// Key of the placeholder entry inside every session container
pub const SENTINEL_KEY: &str = "dummy";

/// Repository backed by any path-addressed document store
#[derive(Debug, Clone)]
pub struct DocumentQaRepository<S> {
    store: S,
}

impl<S> DocumentQaRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn session_path(session_id: &SessionId) -> DocumentPath {
    DocumentPath::root().child(session_id.as_str())
}

fn question_path(session_id: &SessionId, question_id: &QuestionId) -> DocumentPath {
    session_path(session_id).child(question_id.as_str())
}

fn malformed(path: &DocumentPath, reason: impl Into<String>) -> QaError {
    QaError::MalformedDocument {
        path: path.to_string(),
        reason: reason.into(),
    }
}

impl<S> SessionRepository for DocumentQaRepository<S>
where
    S: DocumentStore + Sync,
{
    async fn create_session(&self, session_id: &SessionId) -> QaResult<()> {
        let path = session_path(session_id).child(SENTINEL_KEY);
        self.store
            .post(&path, &json!({ SENTINEL_KEY: SENTINEL_KEY }))
            .await?;

        tracing::debug!(session_id = %session_id, "Session container created");
        Ok(())
    }

    async fn list_questions(
        &self,
        session_id: &SessionId,
    ) -> QaResult<BTreeMap<QuestionId, Question>> {
        let path = session_path(session_id);
        let entries = match self.store.get(&path).await? {
            Value::Null => {
                tracing::debug!(session_id = %session_id, "Session not found, no questions");
                return Ok(BTreeMap::new());
            }
            Value::Object(entries) => entries,
            other => {
                return Err(malformed(
                    &path,
                    format!("expected a session object, found {}", json_type(&other)),
                ));
            }
        };

        entries
            .into_iter()
            .filter(|(key, _)| key != SENTINEL_KEY)
            .map(|(key, document)| {
                let path = path.clone().child(key.as_str());
                let question = QuestionDocument::decode(&path, document)?;
                Ok((QuestionId::from_trusted(key), question))
            })
            .collect()
    }
}

impl<S> QuestionRepository for DocumentQaRepository<S>
where
    S: DocumentStore + Sync,
{
    async fn create(&self, session_id: &SessionId, question: &Question) -> QaResult<QuestionId> {
        let path = session_path(session_id);
        let body = json!({
            "question": question.text.as_str(),
            "userId": question.asker,
            "upVotes": question.up_votes(),
            "likers": question.likers(),
        });

        let key = self.store.post(&path, &body).await?;
        QuestionId::parse(Some(key.as_str()))
            .map_err(|_| malformed(&path, "store assigned an empty key"))
    }

    async fn get(&self, session_id: &SessionId, question_id: &QuestionId) -> QaResult<Question> {
        let path = question_path(session_id, question_id);
        let document = self.store.get(&path).await?;
        QuestionDocument::decode(&path, document)
    }

    async fn update_votes(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        question: &Question,
    ) -> QaResult<()> {
        let path = question_path(session_id, question_id);
        let body = json!({
            "upVotes": question.up_votes(),
            "likers": question.likers(),
        });
        self.store.patch(&path, &body).await?;
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId, question_id: &QuestionId) -> QaResult<()> {
        let path = question_path(session_id, question_id);
        self.store.delete(&path).await?;
        Ok(())
    }
}

/// Stored shape of a question
///
/// `question` and `userId` are required. `upVotes` and `likers` may be
/// missing (the store drops empty arrays) and are reconciled on read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionDocument {
    question: String,
    user_id: UserId,
    #[serde(default)]
    up_votes: i64,
    #[serde(default)]
    likers: Vec<UserId>,
}

impl QuestionDocument {
    fn decode(path: &DocumentPath, document: Value) -> QaResult<Question> {
        let document: QuestionDocument =
            serde_json::from_value(document).map_err(|e| malformed(path, e.to_string()))?;
        Ok(document.into_question(path))
    }

    fn into_question(self, path: &DocumentPath) -> Question {
        let (question, reconciliation) = Question::restore(
            QuestionText::from_stored(self.question),
            self.user_id,
            self.up_votes,
            self.likers,
        );

        if !reconciliation.is_clean() {
            tracing::warn!(
                path = %path,
                duplicate_likers = reconciliation.duplicate_likers,
                stored_up_votes = ?reconciliation.stale_up_votes,
                up_votes = question.up_votes(),
                "Stored question was inconsistent, reconciled from likers"
            );
        }

        question
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::memory_store::InMemoryDocumentStore;

    fn session() -> SessionId {
        SessionId::parse(Some("X8X8X8")).unwrap()
    }

    fn seeded(contents: Value) -> DocumentQaRepository<InMemoryDocumentStore> {
        DocumentQaRepository::new(InMemoryDocumentStore::with_contents(contents))
    }

    #[tokio::test]
    async fn test_create_session_writes_sentinel_only() {
        let repo = DocumentQaRepository::new(InMemoryDocumentStore::new());
        repo.create_session(&session()).await.unwrap();

        let tree = repo.store().snapshot().await;
        let sentinel = tree["X8X8X8"][SENTINEL_KEY].as_object().unwrap();
        assert_eq!(sentinel.len(), 1);
        assert_eq!(
            sentinel.values().next().unwrap(),
            &json!({ "dummy": "dummy" })
        );

        assert!(repo.list_questions(&session()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_questions_hides_sentinel() {
        let repo = seeded(json!({
            "X8X8X8": {
                "-M7_9auLxjfa0p5V5syS": {
                    "likers": ["1", "2"],
                    "question": "This is a question for a test ?",
                    "upVotes": 2,
                    "userId": "1"
                },
                "-M7jwsRjjkWdk5zvA4NY": {
                    "likers": ["1"],
                    "question": "This is another question for a test ?",
                    "upVotes": 1,
                    "userId": "1"
                },
                "dummy": { "-M7_SlxoweonWRIRmriY": { "dummy": "dummy" } }
            }
        }));

        let questions = repo.list_questions(&session()).await.unwrap();
        let keys: Vec<_> = questions.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["-M7_9auLxjfa0p5V5syS", "-M7jwsRjjkWdk5zvA4NY"]);

        let first = &questions[&QuestionId::from_trusted("-M7_9auLxjfa0p5V5syS".into())];
        assert_eq!(first.up_votes(), 2);
        assert_eq!(first.asker.as_str(), "1");
    }

    #[tokio::test]
    async fn test_list_questions_of_unknown_session_is_empty() {
        let repo = DocumentQaRepository::new(InMemoryDocumentStore::new());
        assert!(repo.list_questions(&session()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_questions_rejects_malformed_entry() {
        let repo = seeded(json!({
            "X8X8X8": { "-bad": { "question": "Missing the asker field?" } }
        }));
        let result = repo.list_questions(&session()).await;
        assert!(matches!(result, Err(QaError::MalformedDocument { .. })));
    }

    #[tokio::test]
    async fn test_list_questions_rejects_non_object_session() {
        let repo = seeded(json!({ "X8X8X8": "oops" }));
        let result = repo.list_questions(&session()).await;
        assert!(matches!(result, Err(QaError::MalformedDocument { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_question_is_store_access_fault() {
        let repo = DocumentQaRepository::new(InMemoryDocumentStore::new());
        let id = QuestionId::from_trusted("-missing".into());
        let err = repo.get(&session(), &id).await.unwrap_err();
        assert!(err.is_store_access());
    }

    #[tokio::test]
    async fn test_get_reconciles_inconsistent_counter() {
        let repo = seeded(json!({
            "X8X8X8": {
                "-q": {
                    "likers": ["1", "2", "2"],
                    "question": "This is a question for a test ?",
                    "upVotes": 9,
                    "userId": "1"
                }
            }
        }));
        let id = QuestionId::from_trusted("-q".into());
        let question = repo.get(&session(), &id).await.unwrap();
        assert_eq!(question.up_votes(), 2);
        assert_eq!(question.likers().len(), 2);
    }

    #[tokio::test]
    async fn test_get_tolerates_missing_likers() {
        let repo = seeded(json!({
            "X8X8X8": {
                "-q": { "question": "This is a question for a test ?", "userId": "1" }
            }
        }));
        let id = QuestionId::from_trusted("-q".into());
        let question = repo.get(&session(), &id).await.unwrap();
        assert_eq!(question.up_votes(), 0);
        assert!(question.likers().is_empty());
    }

    #[tokio::test]
    async fn test_create_update_delete_roundtrip_through_store() {
        let repo = DocumentQaRepository::new(InMemoryDocumentStore::new());
        let text = QuestionText::parse(Some("Is this a valid test question?")).unwrap();
        let asker = UserId::parse(Some("u1")).unwrap();
        let mut question = Question::ask(text, asker);

        let id = repo.create(&session(), &question).await.unwrap();
        let stored = repo.store().snapshot().await;
        assert_eq!(
            stored["X8X8X8"][id.as_str()],
            json!({
                "question": "Is this a valid test question?",
                "userId": "u1",
                "upVotes": 1,
                "likers": ["u1"]
            })
        );

        question.upvote(UserId::parse(Some("u2")).unwrap()).unwrap();
        repo.update_votes(&session(), &id, &question).await.unwrap();
        let stored = repo.store().snapshot().await;
        assert_eq!(stored["X8X8X8"][id.as_str()]["upVotes"], json!(2));
        assert_eq!(stored["X8X8X8"][id.as_str()]["likers"], json!(["u1", "u2"]));
        assert_eq!(
            stored["X8X8X8"][id.as_str()]["question"],
            json!("Is this a valid test question?")
        );

        repo.delete(&session(), &id).await.unwrap();
        repo.delete(&session(), &id).await.unwrap();
        assert!(repo.list_questions(&session()).await.unwrap().is_empty());
    }
}
