//! # Storage Context & Collection Resolution
//!
//! A [`StorageContext`] is the heterogeneous bag of named, typed collections
//! a repository resolves against, plus the shared [`Session`].
//!
//! # Architecture Note
//! Scanning the context's members for the one whose element type matches
//! would be linear and fragile; here it is a registration map keyed by
//! `TypeId`. Lookup is constant-time, and the ambiguous case (two collections
//! for one model type) is rejected at registration, where it is a
//! configuration error, instead of on first use.
//!
//! Resolution is eager: a repository resolves its [`CollectionHandle`] once
//! at construction and reuses it. The handle holds a weak reference, so a
//! collection detached from the context afterwards makes every subsequent
//! operation fail with `CollectionUnavailable` rather than operating on a
//! dangling member.

use crate::error::RepoError;
use crate::model::{short_type_name, Structural};
use crate::store::{BackingStore, Session};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::debug;

struct RegisteredCollection {
    name: String,
    // Holds an `Arc<dyn BackingStore<M>>` for the registered model type.
    store: Box<dyn Any + Send + Sync>,
}

/// Named bag of typed collections sharing one backend session.
pub struct StorageContext {
    collections: HashMap<TypeId, RegisteredCollection>,
    session: Arc<dyn Session>,
}

impl StorageContext {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self {
            collections: HashMap::new(),
            session,
        }
    }

    /// Registers the collection holding instances of `M` under `name`.
    ///
    /// At most one collection per model type may exist; a second registration
    /// fails with `AmbiguousCollection`.
    pub fn register<M: Structural>(
        &mut self,
        name: impl Into<String>,
        store: Arc<dyn BackingStore<M>>,
    ) -> Result<(), RepoError> {
        let name = name.into();
        if self.collections.contains_key(&TypeId::of::<M>()) {
            return Err(RepoError::AmbiguousCollection {
                model: short_type_name::<M>(),
            });
        }
        debug!(model = short_type_name::<M>(), name = %name, "Collection registered");
        self.collections.insert(
            TypeId::of::<M>(),
            RegisteredCollection {
                name,
                store: Box::new(store),
            },
        );
        Ok(())
    }

    /// Detaches the collection for `M`, dropping the context's reference.
    /// Handles resolved earlier start failing with `CollectionUnavailable`.
    /// Returns whether a collection was registered.
    pub fn detach<M: Structural>(&mut self) -> bool {
        self.collections.remove(&TypeId::of::<M>()).is_some()
    }

    /// Locates the single collection whose element type is `M`.
    pub fn resolve<M: Structural>(&self) -> Result<CollectionHandle<M>, RepoError> {
        let entry = self
            .collections
            .get(&TypeId::of::<M>())
            .ok_or(RepoError::NoCollectionFound {
                model: short_type_name::<M>(),
            })?;
        let store = entry
            .store
            .downcast_ref::<Arc<dyn BackingStore<M>>>()
            .ok_or(RepoError::NoCollectionFound {
                model: short_type_name::<M>(),
            })?;
        Ok(CollectionHandle {
            name: entry.name.clone(),
            store: Arc::downgrade(store),
        })
    }

    /// The backend session shared by every collection in this context.
    pub fn session(&self) -> Arc<dyn Session> {
        self.session.clone()
    }
}

/// A resolved reference to the collection holding instances of `M`.
pub struct CollectionHandle<M> {
    name: String,
    store: Weak<dyn BackingStore<M>>,
}

impl<M> Clone for CollectionHandle<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            store: self.store.clone(),
        }
    }
}

impl<M: Structural> CollectionHandle<M> {
    /// The name the collection was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The live store, or `CollectionUnavailable` if the backend member was
    /// detached after this handle was resolved.
    pub fn store(&self) -> Result<Arc<dyn BackingStore<M>>, RepoError> {
        self.store
            .upgrade()
            .ok_or(RepoError::CollectionUnavailable {
                model: short_type_name::<M>(),
            })
    }
}
