//! REST Document Store
//!
//! `reqwest`-backed client for a Firebase-style REST API:
//! every document is addressed as `{base_url}/{segment}/.../{last}{suffix}`.

use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::config::StoreConfig;
use crate::document_store::{DocumentPath, DocumentStore, StoreError, StoreResult};

/// Body returned by the store for a successful `POST`
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

#[derive(Debug, Clone)]
pub struct RestDocumentStore {
    client: Client,
    base_url: Url,
    document_suffix: String,
}

impl RestDocumentStore {
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| StoreError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidBaseUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            document_suffix: config.document_suffix.clone(),
        })
    }

    /// Build the URL of the document at `path`
    ///
    /// Segments are percent-encoded, so a key containing `/` cannot escape
    /// its parent.
    pub fn document_url(&self, path: &DocumentPath) -> StoreResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty();
            match path.segments().split_last() {
                Some((last, parents)) => {
                    segments.extend(parents);
                    segments.push(&format!("{}{}", last, self.document_suffix));
                }
                None => {
                    segments.push(&self.document_suffix);
                }
            }
        }
        Ok(url)
    }
}

impl DocumentStore for RestDocumentStore {
    async fn get(&self, path: &DocumentPath) -> StoreResult<Value> {
        let url = self.document_url(path)?;
        let response = self.client.get(url).send().await?;
        let value = ensure_success(response, path)?.json::<Value>().await?;

        tracing::debug!(path = %path, "Store document read");
        Ok(value)
    }

    async fn post(&self, path: &DocumentPath, body: &Value) -> StoreResult<String> {
        let url = self.document_url(path)?;
        let response = self.client.post(url).json(body).send().await?;
        let pushed = ensure_success(response, path)?
            .json::<PushResponse>()
            .await?;

        tracing::debug!(path = %path, key = %pushed.name, "Store document appended");
        Ok(pushed.name)
    }

    async fn patch(&self, path: &DocumentPath, body: &Value) -> StoreResult<()> {
        let url = self.document_url(path)?;
        let response = self.client.patch(url).json(body).send().await?;
        ensure_success(response, path)?;

        tracing::debug!(path = %path, "Store document patched");
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
        let url = self.document_url(path)?;
        let response = self.client.delete(url).send().await?;
        ensure_success(response, path)?;

        tracing::debug!(path = %path, "Store document deleted");
        Ok(())
    }
}

fn ensure_success(response: Response, path: &DocumentPath) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::warn!(path = %path, status = status.as_u16(), "Store rejected request");
        Err(StoreError::Status {
            status: status.as_u16(),
            path: path.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn store(base_url: &str) -> RestDocumentStore {
        RestDocumentStore::new(&StoreConfig::new(base_url)).unwrap()
    }

    #[test]
    fn test_document_url_session() {
        let store = store("https://slimper.firebaseio.com/");
        let url = store
            .document_url(&DocumentPath::root().child("ABC123"))
            .unwrap();
        assert_eq!(url.as_str(), "https://slimper.firebaseio.com/ABC123.json");
    }

    #[test]
    fn test_document_url_question_without_trailing_slash() {
        let store = store("https://slimper.firebaseio.com");
        let url = store
            .document_url(&DocumentPath::root().child("ABC123").child("-M7twp"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://slimper.firebaseio.com/ABC123/-M7twp.json"
        );
    }

    #[test]
    fn test_document_url_encodes_segments() {
        let store = store("http://127.0.0.1:9000/");
        let url = store
            .document_url(&DocumentPath::root().child("ABC123").child("a/b c"))
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/ABC123/a%2Fb%20c.json");
    }

    #[test]
    fn test_document_url_keeps_base_path() {
        let store = store("http://localhost:9000/db/");
        let url = store
            .document_url(&DocumentPath::root().child("ABC123").child("dummy"))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/db/ABC123/dummy.json");
    }

    #[test]
    fn test_document_url_root() {
        let store = store("http://localhost:9000/");
        let url = store.document_url(&DocumentPath::root()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/.json");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = RestDocumentStore::new(&StoreConfig::new("not a url"));
        assert!(matches!(result, Err(StoreError::InvalidBaseUrl(_))));

        let result = RestDocumentStore::new(&StoreConfig::new("mailto:someone@example.com"));
        assert!(matches!(result, Err(StoreError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn test_silent_store_times_out_as_request_error() {
        // Bound but never accepted: the handshake completes, no answer ever comes
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let config = StoreConfig {
            request_timeout: Duration::from_millis(200),
            ..StoreConfig::new(format!("http://{addr}/"))
        };
        let store = RestDocumentStore::new(&config).unwrap();

        let err = store
            .get(&DocumentPath::root().child("ABC123"))
            .await
            .unwrap_err();
        match err {
            StoreError::Request(e) => assert!(e.is_timeout(), "{e}"),
            other => panic!("unexpected error: {other}"),
        }
        drop(listener);
    }
}
