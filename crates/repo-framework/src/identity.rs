//! # Identity Resolution
//!
//! This module defines how the framework knows which field on a type is "the"
//! identity, and how identity values from two unrelated types are compared.
//!
//! # Architecture Note
//! Identity equality is defined over the *string form* of a value. This is
//! deliberate: a DTO's identity often arrives as text (a path segment, a form
//! field) while the stored model keeps a native key type (integer, GUID).
//! Reducing both sides to text lets `"42"` match `42` and a GUID string match
//! a `Uuid` without requiring type equality between the two models.

use crate::error::RepoError;
use crate::model::short_type_name;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// An opaque, comparable identity value, canonicalized to its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityValue(String);

impl IdentityValue {
    /// Builds an identity value from anything with a textual rendering
    /// (integers, GUIDs, strings, ...).
    pub fn new(value: impl ToString) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonicalizes a JSON field value. Strings use their content rather
    /// than their quoted JSON rendering, so `"abc"` and `abc` compare equal.
    pub(crate) fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self(s.clone()),
            other => Self(other.to_string()),
        }
    }
}

impl fmt::Display for IdentityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IdentityValue {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for IdentityValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i32> for IdentityValue {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for IdentityValue {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for IdentityValue {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for IdentityValue {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A declarative identity accessor for a single type, bound at repository
/// construction time and immutable afterwards.
///
/// Two flavors:
/// - [`KeySelector::field`] names the identity field; extraction goes through
///   the serialized field map, matching the name case-insensitively.
/// - [`KeySelector::accessor`] supplies a typed closure; the field name is
///   still recorded for diagnostics and for deriving the DTO-side default.
pub struct KeySelector<T> {
    field: Cow<'static, str>,
    extract: Option<Arc<dyn Fn(&T) -> IdentityValue + Send + Sync>>,
}

impl<T> Clone for KeySelector<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            extract: self.extract.clone(),
        }
    }
}

impl<T> fmt::Debug for KeySelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySelector")
            .field("field", &self.field)
            .field("accessor", &self.extract.is_some())
            .finish()
    }
}

impl<T> KeySelector<T> {
    /// Selects the identity by field name. The name is matched
    /// case-insensitively against the type's serialized fields.
    pub fn field(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: name.into(),
            extract: None,
        }
    }

    /// Selects the identity via a typed accessor closure.
    pub fn accessor(
        name: impl Into<Cow<'static, str>>,
        extract: impl Fn(&T) -> IdentityValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            field: name.into(),
            extract: Some(Arc::new(extract)),
        }
    }

    /// The name of the identity field this selector is bound to.
    pub fn field_name(&self) -> &str {
        &self.field
    }
}

impl<T: Serialize> KeySelector<T> {
    /// Evaluates the selector against an instance.
    ///
    /// Field-based selectors serialize the instance and read the named field;
    /// a missing field or a non-struct serialization is a `ConversionFailure`.
    pub fn extract(&self, instance: &T) -> Result<IdentityValue, RepoError> {
        if let Some(accessor) = &self.extract {
            return Ok(accessor(instance));
        }

        let value = serde_json::to_value(instance)
            .map_err(|e| RepoError::ConversionFailure(e.to_string()))?;
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(RepoError::ConversionFailure(format!(
                    "{} serialized to {other} instead of a field map",
                    short_type_name::<T>(),
                )))
            }
        };
        map.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&self.field))
            .map(|(_, value)| IdentityValue::from_json(value))
            .ok_or_else(|| {
                RepoError::ConversionFailure(format!(
                    "identity field `{}` not present on {}",
                    self.field,
                    short_type_name::<T>(),
                ))
            })
    }

    /// The identity predicate: true when the instance's identity, reduced to
    /// its string form, equals `id`. Instances whose identity cannot be
    /// extracted never match, mirroring a null-valued key.
    pub fn matches(&self, instance: &T, id: &IdentityValue) -> bool {
        self.extract(instance).map_or(false, |value| value == *id)
    }
}
