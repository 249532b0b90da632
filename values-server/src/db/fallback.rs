//! In-memory fallback store
//!
//! Used whenever the database is unreachable or the table is not ready.
//! Records are kept in insertion order, which is also ascending id order
//! because ids come from a monotonically increasing counter.

use chrono::Utc;
use tokio::sync::Mutex;

use crate::models::Value;

/// Number of demo rows the store starts with
const DEMO_ROWS: i64 = 3;

struct Inner {
    records: Vec<Value>,
    next_id: i64,
}

/// Fallback collection plus its id counter, behind one lock.
pub struct FallbackStore {
    inner: Mutex<Inner>,
}

impl FallbackStore {
    /// Empty store, first id 1.
    pub fn empty() -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Store seeded with the demo rows (`Demo Item N` / `Demo Value N`).
    pub fn with_demo_data() -> Self {
        let now = Utc::now();
        let records = (1..=DEMO_ROWS)
            .map(|n| Value::persisted(n, format!("Demo Item {n}"), format!("Demo Value {n}"), now))
            .collect();

        Self {
            inner: Mutex::new(Inner {
                records,
                next_id: DEMO_ROWS + 1,
            }),
        }
    }

    pub async fn list(&self) -> Vec<Value> {
        self.inner.lock().await.records.clone()
    }

    pub async fn get(&self, id: i64) -> Option<Value> {
        let inner = self.inner.lock().await;
        inner.records.iter().find(|v| v.id() == Some(id)).cloned()
    }

    /// Assign the next id and append.
    pub async fn insert(&self, value: Value) -> Value {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let stored = value.with_identity(id, Utc::now());
        inner.records.push(stored.clone());
        stored
    }

    /// Replace name/value of an existing record.
    pub async fn update(&self, id: i64, value: &Value) -> Option<Value> {
        let mut inner = self.inner.lock().await;
        let record = inner.records.iter_mut().find(|v| v.id() == Some(id))?;
        record.set_content(value);
        Some(record.clone())
    }

    pub async fn remove(&self, id: i64) -> Option<Value> {
        let mut inner = self.inner.lock().await;
        let index = inner.records.iter().position(|v| v.id() == Some(id))?;
        Some(inner.records.remove(index))
    }

    /// Best-effort identifier for a record that was never stored:
    /// one past the largest id currently held (1 when empty).
    /// Does not advance the counter.
    pub async fn synthetic_id(&self) -> i64 {
        let inner = self.inner.lock().await;
        inner
            .records
            .iter()
            .filter_map(Value::id)
            .max()
            .map_or(1, |max| max + 1)
    }
}

impl Default for FallbackStore {
    fn default() -> Self {
        Self::with_demo_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn demo_data_seeded() {
        let store = FallbackStore::with_demo_data();
        let ids: Vec<_> = store.list().await.iter().filter_map(Value::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.get(2).await.unwrap().name(), "Demo Item 2");
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = FallbackStore::with_demo_data();
        let a = store.insert(Value::new("a", "1")).await;
        let b = store.insert(Value::new("b", "2")).await;

        assert_eq!(a.id(), Some(4));
        assert_eq!(b.id(), Some(5));
        assert!(a.created_at().is_some());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_remove() {
        let store = FallbackStore::empty();
        let a = store.insert(Value::new("a", "1")).await;
        store.remove(a.id().unwrap()).await.unwrap();

        let b = store.insert(Value::new("b", "2")).await;
        assert_eq!(b.id(), Some(2));
    }

    #[tokio::test]
    async fn update_and_remove_missing() {
        let store = FallbackStore::empty();
        assert!(store.update(1, &Value::new("x", "y")).await.is_none());
        assert!(store.remove(1).await.is_none());
    }

    #[tokio::test]
    async fn update_keeps_identity() {
        let store = FallbackStore::with_demo_data();
        let before = store.get(1).await.unwrap();
        let after = store.update(1, &Value::new("new", "val")).await.unwrap();

        assert_eq!(after.id(), Some(1));
        assert_eq!(after.created_at(), before.created_at());
        assert_eq!(after.value(), "val");
    }

    #[tokio::test]
    async fn synthetic_id_does_not_advance_counter() {
        let store = FallbackStore::with_demo_data();
        assert_eq!(store.synthetic_id().await, 4);
        assert_eq!(store.synthetic_id().await, 4);
        assert_eq!(store.insert(Value::new("a", "b")).await.id(), Some(4));

        assert_eq!(FallbackStore::empty().synthetic_id().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_get_unique_ids() {
        let store = Arc::new(FallbackStore::empty());

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(Value::new(format!("n{i}"), "v")).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.expect("task panicked").id().unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }
}
