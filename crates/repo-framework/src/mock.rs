//! # Failure-Injection Test Doubles
//!
//! Backend failures (connectivity loss, constraint violations, a commit
//! that cannot complete) are hard to reproduce against a healthy in-memory
//! store. The doubles here wrap the reference implementations and fail on
//! demand, so tests can drive every `BackendReadFailure`/`BackendWriteFailure`
//! path deterministically and verify that a failed call never poisons the
//! repository instance.
//!
//! ```rust
//! use repo_framework::mock::FlakyCollection;
//! use repo_framework::BackingStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store: FlakyCollection<u32> = FlakyCollection::new();
//!     store.fail_reads(true);
//!     assert!(store.list().await.is_err());
//!
//!     store.fail_reads(false);
//!     assert!(store.list().await.is_ok());
//! }
//! ```

use crate::store::{BackingStore, MemoryCollection, Session, StoreError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

/// An in-memory collection whose reads and writes can be made to fail.
#[derive(Debug, Default)]
pub struct FlakyCollection<M> {
    inner: MemoryCollection<M>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl<M> FlakyCollection<M> {
    pub fn new() -> Self {
        Self {
            inner: MemoryCollection::new(),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn with_items(items: Vec<M>) -> Self {
        Self {
            inner: MemoryCollection::with_items(items),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent read fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent write fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl<M> BackingStore<M> for FlakyCollection<M>
where
    M: Clone + PartialEq + Send + Sync,
{
    async fn add(&self, item: M) -> Result<M, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::new("injected write failure"));
        }
        self.inner.add(item).await
    }

    async fn list(&self) -> Result<Vec<M>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::new("injected read failure"));
        }
        self.inner.list().await
    }

    async fn remove(&self, item: &M) -> Result<bool, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::new("injected write failure"));
        }
        self.inner.remove(item).await
    }
}

/// A session whose commit can be made to fail.
#[derive(Debug, Default)]
pub struct FlakySession {
    fail_commits: AtomicBool,
}

impl FlakySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Session for FlakySession {
    async fn save_changes(&self) -> Result<(), StoreError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::new("injected commit failure"));
        }
        Ok(())
    }
}
