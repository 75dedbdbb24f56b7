//! # Repo Framework
//!
//! This crate provides a generic data-access shim: given a storage-model type
//! and a transfer-model (DTO) type, it exposes uniform CRUD operations
//! (fetch-all, fetch-by-predicate, fetch-by-id, insert, update, delete)
//! without either type implementing a shared interface.
//!
//! ## Why structural conversion?
//!
//! Layered systems keep two parallel families of types: the records the
//! storage engine owns and the DTOs the boundary exchanges. Making every pair
//! implement mutual `From` conversions is boilerplate that grows with every
//! field and every type. This framework relates the two sides *structurally*
//! instead: field values travel by case-insensitive name match through a
//! self-describing intermediate representation, tolerating extra and missing
//! fields on either side.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Conversion layer** ([`convert`], [`mapper`], [`identity`]): how two
//!    unrelated types exchange field values and agree on identity.
//! 2. **Resolution layer** ([`context`]): how the right collection for a
//!    model type is found inside a heterogeneous storage context.
//! 3. **Orchestration layer** ([`repository`], [`module`]): the public CRUD
//!    surface, error wrapping, and the save/commit boundary.
//!
//! Persistence itself stays behind the [`store`] traits: a durable collection
//! exposes `add`/`list`/`remove`, and a session exposes `save_changes` as the
//! commit boundary. The in-memory implementations are reference backends; a
//! real engine plugs in behind the same traits.
//!
//! ## Core Abstractions
//!
//! ### [`Repository`]: the orchestrator
//!
//! ```rust
//! use repo_framework::{
//!     KeySelector, MemoryCollection, MemorySession, RepoError, Repository, StorageContext,
//! };
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! // The storage model, owned by the backend.
//! #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
//! struct User {
//!     id: u32,
//!     email: String,
//! }
//!
//! // The transfer model, independently defined. No shared trait, no From
//! // impls; only the field names relate the two.
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! struct UserDto {
//!     id: u32,
//!     email: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), RepoError> {
//!     let mut context = StorageContext::new(Arc::new(MemorySession::new()));
//!     context.register::<User>("users", Arc::new(MemoryCollection::<User>::new()))?;
//!
//!     let repo: Repository<User, UserDto> =
//!         Repository::new(&context, KeySelector::field("id"))?;
//!
//!     let created = repo
//!         .add(UserDto { id: 1, email: "alice@example.com".into() })
//!         .await?;
//!     assert_eq!(created.email, "alice@example.com");
//!
//!     let fetched = repo.get_by_id(1).await?;
//!     assert_eq!(fetched.id, 1);
//!
//!     repo.delete(1).await?;
//!     assert!(repo.get_all().await?.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! ### Identity resolution
//!
//! Identity is declared, not assumed: a [`KeySelector`] bound at construction
//! names the identity field (or supplies a typed accessor closure). Equality
//! is defined over the *string form* of the value, so a DTO carrying `"42"`
//! matches a model storing `42`, and GUID keys match their textual rendering.
//!
//! ## Error Model
//!
//! Every observable failure is one of the kinds enumerated in [`RepoError`];
//! backend internals never leak through as their own types. Failures are
//! fatal to the triggering call only; the repository stays usable. The one
//! intentionally swallowed condition is deleting an absent record: delete is
//! idempotent, while `get`/`get_by_id` treat absence as an error.
//!
//! ## Concurrency Model
//!
//! Operations are async and non-blocking at the call boundary, but a
//! repository instance shares one logical backend session: concurrent writes
//! against the same instance require external synchronization. No internal
//! locks, retries, timeouts, or cancellation.
//!
//! ## Testing
//!
//! The [`mock`] module provides failure-injection doubles
//! ([`mock::FlakyCollection`], [`mock::FlakySession`]) for driving backend
//! error paths deterministically.

pub mod context;
pub mod convert;
pub mod error;
pub mod identity;
pub mod mapper;
pub mod mock;
pub mod model;
pub mod module;
pub mod repository;
pub mod store;
pub mod tracing;

// Re-export core types for convenience
pub use context::{CollectionHandle, StorageContext};
pub use convert::{convert_many, convert_one};
pub use error::RepoError;
pub use identity::{IdentityValue, KeySelector};
pub use mapper::apply_fields;
pub use model::Structural;
pub use module::RepoModule;
pub use repository::Repository;
pub use store::{BackingStore, MemoryCollection, MemorySession, Session, StoreError};
