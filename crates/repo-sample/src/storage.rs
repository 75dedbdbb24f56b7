//! # Storage Context Construction
//!
//! The sample's stand-in for a real backend context factory: one session,
//! one named collection per storage model. A production integration would
//! register collections backed by an actual engine behind the same traits.

use crate::model::{Post, User};
use async_trait::async_trait;
use repo_framework::{
    MemoryCollection, MemorySession, RepoError, Session, StorageContext, StoreError,
};
use std::sync::Arc;
use tracing::debug;

/// Session wrapper that logs every commit. Demonstrates that the commit
/// boundary is a trait seam a real backend can occupy.
#[derive(Debug, Default)]
pub struct AuditSession {
    inner: MemorySession,
}

impl AuditSession {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Session for AuditSession {
    async fn save_changes(&self) -> Result<(), StoreError> {
        self.inner.save_changes().await?;
        debug!(commits = self.inner.commits(), "Session committed");
        Ok(())
    }
}

/// Builds the sample context: `Users` and `Posts` collections sharing one
/// session.
pub fn build_context() -> Result<StorageContext, RepoError> {
    let mut context = StorageContext::new(Arc::new(AuditSession::new()));
    context.register::<User>("Users", Arc::new(MemoryCollection::<User>::new()))?;
    context.register::<Post>("Posts", Arc::new(MemoryCollection::<Post>::new()))?;
    Ok(context)
}
