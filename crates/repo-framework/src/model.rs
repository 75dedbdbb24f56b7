//! # Structural Capability Trait
//!
//! The `Structural` trait is the only contract a storage model or transfer
//! model has to meet. The two sides never reference each other and share no
//! nominal interface; they are related purely by field names at runtime.
//!
//! # Architecture Note
//! Why a blanket trait instead of a derive or a registry?
//! The framework converts between unrelated types by round-tripping them
//! through a self-describing field map (see [`crate::convert`]). `serde` is
//! the schema mechanism Rust already has for that: `Serialize` exposes a
//! type's fields by name, `DeserializeOwned` rebuilds a value from them.
//! `Default` supplies the values for target fields the source does not carry.
//!
//! Any plain data type with the usual derives qualifies automatically:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! struct User {
//!     id: u32,
//!     email: String,
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Capability trait for any type participating in structural conversion,
/// storage models and transfer models alike.
///
/// Blanket-implemented; never implement it by hand.
pub trait Structural:
    Serialize + DeserializeOwned + Default + Clone + Debug + Send + Sync + 'static
{
}

impl<T> Structural for T where
    T: Serialize + DeserializeOwned + Default + Clone + Debug + Send + Sync + 'static
{
}

/// Extract just the type name (e.g. "User" instead of "repo_sample::model::User").
pub(crate) fn short_type_name<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
