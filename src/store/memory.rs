//! In-memory record store double for tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::error::StoreError;
use super::{InsertOutcome, TitleStore};

#[derive(Default)]
struct MemoryInner {
    rows: Vec<String>,
    keys: HashSet<String>,
}

/// Vec-backed store with a uniqueness constraint on the exact title text and
/// a write-failure toggle for error-path tests.
#[derive(Default)]
pub struct MemoryTitleStore {
    inner: Mutex<MemoryInner>,
    fail_writes: AtomicBool,
}

impl MemoryTitleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts directly, bypassing the engine — simulates approvals made by
    /// another process (the drift that `hydrate` reconciliation repairs).
    pub fn seed<I, T>(&self, titles: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut inner = self.inner.lock();
        for title in titles {
            let title = title.as_ref();
            if inner.keys.insert(title.to_string()) {
                inner.rows.push(title.to_string());
            }
        }
    }

    /// When set, every `insert_title` call fails until cleared.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().rows.is_empty()
    }
}

impl TitleStore for MemoryTitleStore {
    async fn insert_title(&self, text: &str) -> Result<InsertOutcome, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "write failure injected".to_string(),
            });
        }

        let mut inner = self.inner.lock();
        if !inner.keys.insert(text.to_string()) {
            return Ok(InsertOutcome::Duplicate);
        }
        inner.rows.push(text.to_string());
        Ok(InsertOutcome::Inserted(inner.rows.len() as i64))
    }

    async fn list_approved_titles(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.inner.lock().rows.clone())
    }
}
