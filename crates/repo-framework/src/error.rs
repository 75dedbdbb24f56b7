//! # Repository Errors
//!
//! This module defines the common error types used throughout the repository
//! framework. By centralizing error definitions, we ensure that every failure
//! a caller can observe is one of the enumerated kinds below; backend
//! internals never cross the boundary as their own types.

use crate::store::StoreError;

/// Errors that can occur within the repository framework itself.
///
/// Every failure is fatal to the single operation call that raised it, but
/// never to the repository instance: subsequent calls proceed normally.
/// The operation-scoped variants carry the operation name and a rendering of
/// the input that triggered them, to aid diagnosis.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// No collection is registered for the requested model type.
    #[error("no collection registered for model type {model}")]
    NoCollectionFound { model: &'static str },

    /// More than one collection was registered for the same model type.
    /// This is a configuration error, surfaced at registration time.
    #[error("more than one collection registered for model type {model}")]
    AmbiguousCollection { model: &'static str },

    /// The collection resolved at construction is no longer attached to its
    /// storage context.
    #[error("collection for model type {model} is no longer attached to its context")]
    CollectionUnavailable { model: &'static str },

    /// Structural conversion produced an empty representation, or the target
    /// could not absorb the source's field values.
    #[error("conversion failed: {0}")]
    ConversionFailure(String),

    /// A single-record read did not find its record. Absence is exceptional
    /// for `get` and `get_by_id`; only `delete` swallows it.
    #[error("{operation}({input}): record not found")]
    NotFound {
        operation: &'static str,
        input: String,
    },

    /// A single-record predicate read matched more than one record.
    #[error("{operation}({input}): more than one record matched")]
    MultipleMatches {
        operation: &'static str,
        input: String,
    },

    /// An identity lookup matched more than one record. Identity is unique by
    /// invariant, so this is fatal, not a retry case.
    #[error("{operation}({input}): identity matched {count} records")]
    DuplicateIdentity {
        operation: &'static str,
        input: String,
        count: usize,
    },

    /// The backing store failed while reading.
    #[error("{operation}({input}): backend read failed: {source}")]
    BackendReadFailure {
        operation: &'static str,
        input: String,
        source: StoreError,
    },

    /// The backing store or session failed while writing or committing.
    #[error("{operation}({input}): backend write failed: {source}")]
    BackendWriteFailure {
        operation: &'static str,
        input: String,
        source: StoreError,
    },
}
