//! # Generic Repository
//!
//! The orchestrator: composes collection resolution, structural conversion,
//! identity resolution and field mapping into the public CRUD surface.
//!
//! # Architecture Note
//! `Repository<M, D>` is generic over two unrelated types, the storage
//! model `M` and the transfer model `D`, that only have to be
//! [`Structural`]. Reads filter stored models and convert the results into
//! DTOs; writes convert the incoming DTO into a model (insert) or map its
//! fields onto the located record (update), then commit through the shared
//! session. Every public write is one commit unit; there is no batching
//! across calls, no internal retry, and a failed call never poisons the
//! instance.
//!
//! The repository assumes one logical backend session per instance. Callers
//! issuing concurrent writes against the same instance must synchronize
//! externally.

use crate::context::{CollectionHandle, StorageContext};
use crate::convert::{convert_many, convert_one};
use crate::error::RepoError;
use crate::identity::{IdentityValue, KeySelector};
use crate::mapper::apply_fields;
use crate::model::{short_type_name, Structural};
use crate::store::{Session, StoreError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Uniform CRUD surface over a storage model `M` exposed as DTOs of type `D`.
pub struct Repository<M: Structural, D: Structural> {
    collection: CollectionHandle<M>,
    session: Arc<dyn Session>,
    model_key: KeySelector<M>,
    dto_key: KeySelector<D>,
}

impl<M: Structural, D: Structural> Repository<M, D> {
    /// Builds a repository bound to the collection holding `M` inside
    /// `context`. Resolution happens here, eagerly; the handle is reused for
    /// the repository's lifetime.
    ///
    /// The DTO identity selector defaults to the model selector's field
    /// name; override it with [`with_dto_key`](Self::with_dto_key) when the
    /// DTO names its identity differently.
    pub fn new(context: &StorageContext, model_key: KeySelector<M>) -> Result<Self, RepoError> {
        let dto_key = KeySelector::field(model_key.field_name().to_owned());
        let collection = context.resolve::<M>()?;
        debug!(
            model = short_type_name::<M>(),
            dto = short_type_name::<D>(),
            collection = collection.name(),
            "Repository bound"
        );
        Ok(Self {
            collection,
            session: context.session(),
            model_key,
            dto_key,
        })
    }

    /// Replaces the DTO-side identity selector.
    pub fn with_dto_key(mut self, dto_key: KeySelector<D>) -> Self {
        self.dto_key = dto_key;
        self
    }

    /// Returns the entire collection, converted.
    pub async fn get_all(&self) -> Result<Vec<D>, RepoError> {
        debug!(model = short_type_name::<M>(), "GetAll");
        let records = self.records("get_all", "").await?;
        convert_many(&records)
    }

    /// Returns every record matching `predicate`, converted. The predicate
    /// sees stored models, not DTOs.
    pub async fn filter<P>(&self, predicate: P) -> Result<Vec<D>, RepoError>
    where
        P: Fn(&M) -> bool,
    {
        debug!(model = short_type_name::<M>(), "Where");
        let records = self.records("filter", "<predicate>").await?;
        let matched: Vec<M> = records.into_iter().filter(|m| predicate(m)).collect();
        convert_many(&matched)
    }

    /// Returns the single record matching `predicate`.
    ///
    /// Absence is exceptional here: zero matches is `NotFound`, more than
    /// one is `MultipleMatches`.
    pub async fn get<P>(&self, predicate: P) -> Result<D, RepoError>
    where
        P: Fn(&M) -> bool,
    {
        const OP: &str = "get";
        let records = self.records(OP, "<predicate>").await?;
        let matched: Vec<&M> = records.iter().filter(|m| predicate(m)).collect();
        match matched.as_slice() {
            [] => {
                warn!(model = short_type_name::<M>(), "Not found");
                Err(RepoError::NotFound {
                    operation: OP,
                    input: "<predicate>".into(),
                })
            }
            [record] => convert_one(record),
            _ => Err(RepoError::MultipleMatches {
                operation: OP,
                input: "<predicate>".into(),
            }),
        }
    }

    /// Returns the single record whose identity equals `id`.
    pub async fn get_by_id(&self, id: impl Into<IdentityValue>) -> Result<D, RepoError> {
        const OP: &str = "get_by_id";
        let id = id.into();
        debug!(model = short_type_name::<M>(), %id, "GetById");
        let records = self.records(OP, id.as_str()).await?;
        let matched: Vec<&M> = records
            .iter()
            .filter(|m| self.model_key.matches(m, &id))
            .collect();
        match matched.as_slice() {
            [] => {
                warn!(model = short_type_name::<M>(), %id, "Not found");
                Err(RepoError::NotFound {
                    operation: OP,
                    input: id.to_string(),
                })
            }
            [record] => convert_one(record),
            _ => Err(RepoError::MultipleMatches {
                operation: OP,
                input: id.to_string(),
            }),
        }
    }

    /// Converts `dto` into a storage model, inserts it, commits, and returns
    /// the stored form converted back, reflecting any backend-assigned
    /// identity.
    pub async fn add(&self, dto: D) -> Result<D, RepoError> {
        const OP: &str = "add";
        let input = render(&dto);
        debug!(model = short_type_name::<M>(), "Add");
        let model: M = convert_one(&dto).map_err(|e| wrap_conversion(OP, &input, e))?;
        let store = self.collection.store()?;
        let stored = store
            .add(model)
            .await
            .map_err(|source| self.write_failure(OP, &input, source))?;
        self.commit(OP, &input).await?;
        info!(model = short_type_name::<M>(), "Added");
        convert_one(&stored).map_err(|e| wrap_conversion(OP, &input, e))
    }

    /// Locates the record identified by `dto`'s identity field, applies the
    /// DTO's fields over it, commits, and returns the updated record.
    ///
    /// The record must exist: a missing target is `NotFound`, never a silent
    /// insert.
    pub async fn update(&self, dto: D) -> Result<D, RepoError> {
        const OP: &str = "update";
        let input = render(&dto);
        let id = self
            .dto_key
            .extract(&dto)
            .map_err(|e| wrap_conversion(OP, &input, e))?;
        debug!(model = short_type_name::<M>(), %id, "Update");
        let records = self.records(OP, &input).await?;
        let mut matched: Vec<M> = records
            .into_iter()
            .filter(|m| self.model_key.matches(m, &id))
            .collect();
        match matched.len() {
            0 => {
                warn!(model = short_type_name::<M>(), %id, "Not found");
                Err(RepoError::NotFound {
                    operation: OP,
                    input,
                })
            }
            1 => {
                let existing = matched.remove(0);
                let mut updated = existing.clone();
                apply_fields(&dto, &mut updated).map_err(|e| wrap_conversion(OP, &input, e))?;
                let store = self.collection.store()?;
                let removed = store
                    .remove(&existing)
                    .await
                    .map_err(|source| self.write_failure(OP, &input, source))?;
                if !removed {
                    return Err(self.write_failure(
                        OP,
                        &input,
                        StoreError::new("record vanished while updating"),
                    ));
                }
                let stored = store
                    .add(updated)
                    .await
                    .map_err(|source| self.write_failure(OP, &input, source))?;
                self.commit(OP, &input).await?;
                info!(model = short_type_name::<M>(), %id, "Updated");
                convert_one(&stored).map_err(|e| wrap_conversion(OP, &input, e))
            }
            count => Err(RepoError::DuplicateIdentity {
                operation: OP,
                input,
                count,
            }),
        }
    }

    /// Removes the record whose identity equals `id` and commits.
    ///
    /// Deleting an absent record is a silent no-op; delete is idempotent.
    /// An identity matching more than one record is fatal.
    pub async fn delete(&self, id: impl Into<IdentityValue>) -> Result<(), RepoError> {
        const OP: &str = "delete";
        let id = id.into();
        let input = id.to_string();
        debug!(model = short_type_name::<M>(), %id, "Delete");
        let records = self.records(OP, &input).await?;
        let mut matched: Vec<M> = records
            .into_iter()
            .filter(|m| self.model_key.matches(m, &id))
            .collect();
        match matched.len() {
            0 => {
                debug!(model = short_type_name::<M>(), %id, "Nothing to delete");
                Ok(())
            }
            1 => {
                let existing = matched.remove(0);
                let store = self.collection.store()?;
                let removed = store
                    .remove(&existing)
                    .await
                    .map_err(|source| self.write_failure(OP, &input, source))?;
                if removed {
                    self.commit(OP, &input).await?;
                    info!(model = short_type_name::<M>(), %id, "Deleted");
                }
                Ok(())
            }
            count => Err(RepoError::DuplicateIdentity {
                operation: OP,
                input,
                count,
            }),
        }
    }

    async fn records(&self, operation: &'static str, input: &str) -> Result<Vec<M>, RepoError> {
        let store = self.collection.store()?;
        store
            .list()
            .await
            .map_err(|source| RepoError::BackendReadFailure {
                operation,
                input: input.to_owned(),
                source,
            })
    }

    async fn commit(&self, operation: &'static str, input: &str) -> Result<(), RepoError> {
        self.session
            .save_changes()
            .await
            .map_err(|source| self.write_failure(operation, input, source))
    }

    fn write_failure(
        &self,
        operation: &'static str,
        input: &str,
        source: StoreError,
    ) -> RepoError {
        warn!(
            model = short_type_name::<M>(),
            operation,
            error = %source,
            "Backend write failed"
        );
        RepoError::BackendWriteFailure {
            operation,
            input: input.to_owned(),
            source,
        }
    }
}

/// Renders an input for error context; falls back to the debug form when the
/// value cannot be serialized.
fn render<V: Structural>(value: &V) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}

/// Attaches the operation name and triggering input to conversion errors.
fn wrap_conversion(operation: &str, input: &str, error: RepoError) -> RepoError {
    match error {
        RepoError::ConversionFailure(reason) => {
            RepoError::ConversionFailure(format!("{operation}({input}): {reason}"))
        }
        other => other,
    }
}
