//! # RepoModule Trait
//!
//! Provides a common interface for domain-specific modules wrapping a
//! [`Repository`], adding default `get_all`, `get_by_id` and `delete`
//! methods so wrappers only write the operations that need domain logic.

use crate::error::RepoError;
use crate::identity::IdentityValue;
use crate::model::Structural;
use crate::repository::Repository;
use async_trait::async_trait;

/// Trait for domain modules to inherit the standard read/delete operations.
///
/// A module exposes its own error type and maps framework errors into it;
/// `add`/`update` usually carry domain validation and stay hand-written.
///
/// # Example
///
/// ```rust
/// use repo_framework::{
///     IdentityValue, KeySelector, MemoryCollection, MemorySession, RepoError, RepoModule,
///     Repository, StorageContext,
/// };
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
///
/// #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// struct User { id: u32, email: String }
///
/// #[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// struct UserDto { id: u32, email: String }
///
/// struct UserModule { repo: Repository<User, UserDto> }
///
/// #[async_trait]
/// impl RepoModule<User, UserDto> for UserModule {
///     type Error = String;
///
///     fn repo(&self) -> &Repository<User, UserDto> {
///         &self.repo
///     }
///
///     fn map_error(e: RepoError) -> Self::Error {
///         e.to_string()
///     }
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let mut context = StorageContext::new(Arc::new(MemorySession::new()));
///     context
///         .register::<User>("users", Arc::new(MemoryCollection::<User>::new()))
///         .map_err(|e| e.to_string())?;
///     let module = UserModule {
///         repo: Repository::new(&context, KeySelector::field("id")).map_err(|e| e.to_string())?,
///     };
///
///     // get_all() and delete() are provided automatically.
///     assert!(module.get_all().await?.is_empty());
///     module.delete(IdentityValue::from(1)).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait RepoModule<M: Structural, D: Structural>: Send + Sync {
    /// The module-specific error type.
    type Error: Send + Sync;

    /// Access the wrapped generic repository.
    fn repo(&self) -> &Repository<M, D>;

    /// Map framework errors to the module error type.
    fn map_error(e: RepoError) -> Self::Error;

    /// Fetch the whole collection.
    #[tracing::instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<D>, Self::Error> {
        tracing::debug!("Forwarding to repository");
        self.repo().get_all().await.map_err(Self::map_error)
    }

    /// Fetch one record by identity.
    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: IdentityValue) -> Result<D, Self::Error> {
        tracing::debug!("Forwarding to repository");
        self.repo().get_by_id(id).await.map_err(Self::map_error)
    }

    /// Delete one record by identity. Idempotent.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: IdentityValue) -> Result<(), Self::Error> {
        tracing::debug!("Forwarding to repository");
        self.repo().delete(id).await.map_err(Self::map_error)
    }
}
