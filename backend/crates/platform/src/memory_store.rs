//! In-Memory Document Store
//!
//! A JSON tree behind an async lock that mirrors the REST store semantics:
//! absent documents read as `null`, `post` generates keys that sort in
//! insertion order, `patch` merges top-level fields (a `null` field removes
//! the key), and `delete` prunes containers left empty.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::document_store::{DocumentPath, DocumentStore, StoreError, StoreResult};
use crate::random::{ALPHANUMERIC, random_string};

#[derive(Debug, Clone)]
pub struct InMemoryDocumentStore {
    root: Arc<RwLock<Value>>,
    sequence: Arc<AtomicU64>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::with_contents(Value::Object(Map::new()))
    }

    /// Seed the store with an existing tree
    pub fn with_contents(root: Value) -> Self {
        Self {
            root: Arc::new(RwLock::new(root)),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Copy of the whole tree
    pub async fn snapshot(&self) -> Value {
        self.root.read().await.clone()
    }

    fn next_key(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("-{:08X}{}", seq, random_string(11, ALPHANUMERIC))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, path: &DocumentPath) -> StoreResult<Value> {
        let root = self.root.read().await;
        let found = path
            .segments()
            .iter()
            .try_fold(&*root, |node, segment| node.get(segment.as_str()));
        Ok(found.cloned().unwrap_or(Value::Null))
    }

    async fn post(&self, path: &DocumentPath, body: &Value) -> StoreResult<String> {
        let key = self.next_key();
        let mut root = self.root.write().await;
        let container = container_mut(&mut root, path)?;
        container.insert(key.clone(), body.clone());
        Ok(key)
    }

    async fn patch(&self, path: &DocumentPath, body: &Value) -> StoreResult<()> {
        let fields = body
            .as_object()
            .ok_or_else(|| StoreError::InvalidBody("PATCH body must be a JSON object".into()))?;

        let mut root = self.root.write().await;
        let container = container_mut(&mut root, path)?;
        for (field, value) in fields {
            if value.is_null() {
                container.remove(field);
            } else {
                container.insert(field.clone(), value.clone());
            }
        }
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
        let mut root = self.root.write().await;
        if path.is_root() {
            *root = Value::Object(Map::new());
        } else {
            remove_and_prune(&mut root, path.segments());
        }
        Ok(())
    }
}

/// Walk to the node at `path`, creating intermediate containers
fn container_mut<'a>(
    root: &'a mut Value,
    path: &DocumentPath,
) -> StoreResult<&'a mut Map<String, Value>> {
    let mut current = root;
    for segment in path.segments() {
        let map = as_container(current, path)?;
        current = map
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    as_container(current, path)
}

fn as_container<'a>(
    node: &'a mut Value,
    path: &DocumentPath,
) -> StoreResult<&'a mut Map<String, Value>> {
    if node.is_null() {
        *node = Value::Object(Map::new());
    }
    node.as_object_mut()
        .ok_or_else(|| StoreError::NotAContainer(path.to_string()))
}

/// Remove the node under `segments`; returns true when `node` is left empty
fn remove_and_prune(node: &mut Value, segments: &[String]) -> bool {
    let Some((head, rest)) = segments.split_first() else {
        return false;
    };
    let Some(map) = node.as_object_mut() else {
        return false;
    };

    if rest.is_empty() {
        map.remove(head.as_str());
    } else if let Some(child) = map.get_mut(head.as_str()) {
        if remove_and_prune(child, rest) {
            map.remove(head.as_str());
        }
    }
    map.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::assert_ok;

    fn path(segments: &[&str]) -> DocumentPath {
        segments
            .iter()
            .fold(DocumentPath::root(), |path, s| path.child(*s))
    }

    #[tokio::test]
    async fn test_get_absent_is_null() {
        let store = InMemoryDocumentStore::new();
        assert_eq!(store.get(&path(&["NOPE00"])).await.unwrap(), Value::Null);
        assert_eq!(
            store.get(&path(&["NOPE00", "question"])).await.unwrap(),
            Value::Null
        );
    }

    #[tokio::test]
    async fn test_post_keys_sort_in_insertion_order() {
        let store = InMemoryDocumentStore::new();
        let first = store.post(&path(&["S"]), &json!({"n": 1})).await.unwrap();
        let second = store.post(&path(&["S"]), &json!({"n": 2})).await.unwrap();
        assert!(first.starts_with('-'));
        assert_eq!(first.len(), 20);
        assert!(first < second);

        let session = store.get(&path(&["S"])).await.unwrap();
        let keys: Vec<_> = session.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec![first, second]);
    }

    #[tokio::test]
    async fn test_patch_merges_top_level_fields() {
        let store = InMemoryDocumentStore::new();
        let key = store
            .post(&path(&["S"]), &json!({"a": 1, "b": [1], "c": true}))
            .await
            .unwrap();

        assert_ok!(
            store
                .patch(&path(&["S", key.as_str()]), &json!({"b": [1, 2], "c": null}))
                .await
        );

        let doc = store.get(&path(&["S", key.as_str()])).await.unwrap();
        assert_eq!(doc, json!({"a": 1, "b": [1, 2]}));
    }

    #[tokio::test]
    async fn test_patch_rejects_non_object_body() {
        let store = InMemoryDocumentStore::new();
        let result = store.patch(&path(&["S"]), &json!([1, 2])).await;
        assert!(matches!(result, Err(StoreError::InvalidBody(_))));
    }

    #[tokio::test]
    async fn test_post_below_leaf_fails() {
        let store = InMemoryDocumentStore::with_contents(json!({"S": {"leaf": 5}}));
        let result = store.post(&path(&["S", "leaf"]), &json!({})).await;
        assert!(matches!(result, Err(StoreError::NotAContainer(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_and_prunes() {
        let store = InMemoryDocumentStore::new();
        let key = store.post(&path(&["S"]), &json!({"a": 1})).await.unwrap();

        assert_ok!(store.delete(&path(&["S", key.as_str()])).await);
        assert_ok!(store.delete(&path(&["S", key.as_str()])).await);
        assert_ok!(store.delete(&path(&["MISSING", "x"])).await);

        assert_eq!(store.snapshot().await, json!({}));
    }
}
