//! # Durable Collection Backend
//!
//! The repository treats persistence as a black box behind two small async
//! traits: a per-collection [`BackingStore`] and a session-level [`Session`]
//! whose `save_changes` is the commit boundary. Engine internals such as
//! transactions, query translation, and pooling live behind these traits
//! and are not this crate's concern.
//!
//! The in-memory implementations here make the crate usable and testable on
//! its own; a real backend supplies its own implementations.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Opaque backend failure. Implementations render their internal errors to
/// text before crossing this boundary; no engine-specific types leak through.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A durable collection of `M` records.
#[async_trait]
pub trait BackingStore<M>: Send + Sync {
    /// Appends a record. The returned value is the stored form, reflecting
    /// any backend-assigned identity.
    async fn add(&self, item: M) -> Result<M, StoreError>;

    /// Snapshot enumeration of the collection.
    async fn list(&self) -> Result<Vec<M>, StoreError>;

    /// Removes the first record equal to `item`. Returns whether a record
    /// was removed.
    async fn remove(&self, item: &M) -> Result<bool, StoreError>;
}

/// The session shared by all collections of one storage context.
///
/// One logical session per repository instance; it is not safe for
/// concurrent writes, and callers issuing them must synchronize externally.
#[async_trait]
pub trait Session: Send + Sync {
    /// Commits all pending mutations, atomically from the caller's
    /// perspective. Called exactly once per repository write operation.
    async fn save_changes(&self) -> Result<(), StoreError>;
}

/// In-memory reference collection backed by a `Vec` behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryCollection<M> {
    items: RwLock<Vec<M>>,
}

impl<M> MemoryCollection<M> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    pub fn with_items(items: Vec<M>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl<M> BackingStore<M> for MemoryCollection<M>
where
    M: Clone + PartialEq + Send + Sync,
{
    async fn add(&self, item: M) -> Result<M, StoreError> {
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn list(&self) -> Result<Vec<M>, StoreError> {
        Ok(self.items.read().await.clone())
    }

    async fn remove(&self, item: &M) -> Result<bool, StoreError> {
        let mut items = self.items.write().await;
        match items.iter().position(|existing| existing == item) {
            Some(index) => {
                items.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory session. Mutations against [`MemoryCollection`] apply
/// immediately, so committing only records that a commit happened, which is
/// exactly what tests need to assert the one-commit-per-write contract.
#[derive(Debug, Default)]
pub struct MemorySession {
    commits: AtomicU64,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commits issued so far.
    pub fn commits(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn save_changes(&self) -> Result<(), StoreError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
