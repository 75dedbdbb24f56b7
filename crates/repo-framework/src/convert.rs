//! # Structural Converter
//!
//! Converts an instance (or list) of one type into another using only
//! field-name correspondence. Neither side implements anything beyond
//! [`Structural`](crate::model::Structural); the bridge is a self-describing
//! intermediate representation: a `serde_json` field map, recursive for
//! nested fields.
//!
//! # Architecture Note
//! The conversion deliberately tolerates shape drift in both directions:
//! source fields with no counterpart on the target are ignored, and target
//! fields with no counterpart in the source keep the target's `Default`
//! value. Field names match case-insensitively. Value kinds are *not*
//! pre-validated; an incompatible value surfaces as a `ConversionFailure`
//! from the final deserialization step.
//!
//! Circular references cannot occur here: owned Rust data cannot form
//! back-edges, so there is no reference-loop suppression to perform.

use crate::error::RepoError;
use crate::model::{short_type_name, Structural};
use serde::Serialize;
use serde_json::{Map, Value};

/// Converts `source` into a fresh `T` by structural field matching.
///
/// Fails with `ConversionFailure` when `source` serializes to an empty or
/// undefined representation, the only conversion-stage error condition.
pub fn convert_one<S: Serialize, T: Structural>(source: &S) -> Result<T, RepoError> {
    let repr = represent(source)?;
    rebuild(&repr)
}

/// Converts a slice element-wise.
///
/// Elements whose representation is empty or undefined are silently dropped
/// from the output rather than failing the whole list; callers must not
/// assume count preservation. Any other failure propagates.
pub fn convert_many<S: Serialize, T: Structural>(sources: &[S]) -> Result<Vec<T>, RepoError> {
    let mut results = Vec::with_capacity(sources.len());
    for source in sources {
        let value = serde_json::to_value(source)
            .map_err(|e| RepoError::ConversionFailure(e.to_string()))?;
        match value {
            Value::Null => continue,
            Value::Object(map) if map.is_empty() => continue,
            Value::Object(map) => results.push(rebuild(&map)?),
            other => {
                return Err(RepoError::ConversionFailure(format!(
                    "expected a field map, got {other}"
                )))
            }
        }
    }
    Ok(results)
}

/// Serializes `source` into the intermediate name→value representation.
pub(crate) fn represent<S: Serialize>(source: &S) -> Result<Map<String, Value>, RepoError> {
    let value =
        serde_json::to_value(source).map_err(|e| RepoError::ConversionFailure(e.to_string()))?;
    match value {
        Value::Object(map) if !map.is_empty() => Ok(map),
        Value::Null => Err(RepoError::ConversionFailure(
            "source serialized to an empty representation".into(),
        )),
        Value::Object(_) => Err(RepoError::ConversionFailure(
            "source carries no fields".into(),
        )),
        other => Err(RepoError::ConversionFailure(format!(
            "expected a field map, got {other}"
        ))),
    }
}

/// Case-insensitive field lookup in a representation.
fn lookup<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    map.get(name).or_else(|| {
        map.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

/// Rebuilds a `T` from a representation: start from `T::default()`'s fields,
/// overwrite every one with a name match, deserialize the merged map.
fn rebuild<T: Structural>(repr: &Map<String, Value>) -> Result<T, RepoError> {
    let template = serde_json::to_value(T::default())
        .map_err(|e| RepoError::ConversionFailure(e.to_string()))?;
    let mut target = match template {
        Value::Object(map) => map,
        other => {
            return Err(RepoError::ConversionFailure(format!(
                "{} serializes to {other}, not a field map",
                short_type_name::<T>(),
            )))
        }
    };

    for (name, slot) in target.iter_mut() {
        if let Some(value) = lookup(repr, name) {
            *slot = value.clone();
        }
    }

    serde_json::from_value(Value::Object(target))
        .map_err(|e| RepoError::ConversionFailure(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Stored {
        id: u32,
        email: String,
        internal_rank: u8,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Dto {
        id: u32,
        email: String,
        display_name: String,
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct PascalDto {
        id: u32,
        email: String,
    }

    #[test]
    fn round_trip_preserves_shared_fields() {
        let stored = Stored {
            id: 7,
            email: "a@x.com".into(),
            internal_rank: 3,
        };
        let dto: Dto = convert_one(&stored).unwrap();
        let back: Stored = convert_one(&dto).unwrap();
        assert_eq!(back.id, stored.id);
        assert_eq!(back.email, stored.email);
        // `internal_rank` has no counterpart on Dto; it falls back to default.
        assert_eq!(back.internal_rank, 0);
    }

    #[test]
    fn extra_source_fields_are_ignored_and_missing_target_fields_default() {
        let dto = Dto {
            id: 1,
            email: "b@x.com".into(),
            display_name: "B".into(),
        };
        let stored: Stored = convert_one(&dto).unwrap();
        assert_eq!(stored.id, 1);
        assert_eq!(stored.email, "b@x.com");
        assert_eq!(stored.internal_rank, 0);
    }

    #[test]
    fn field_names_match_case_insensitively() {
        let stored = Stored {
            id: 4,
            email: "c@x.com".into(),
            internal_rank: 0,
        };
        let pascal: PascalDto = convert_one(&stored).unwrap();
        assert_eq!(pascal.id, 4);
        assert_eq!(pascal.email, "c@x.com");
    }

    #[test]
    fn empty_representation_fails() {
        let nothing: Option<Stored> = None;
        let result: Result<Dto, _> = convert_one(&nothing);
        assert!(matches!(result, Err(RepoError::ConversionFailure(_))));
    }

    #[test]
    fn incompatible_value_kind_surfaces_downstream() {
        #[derive(Debug, Clone, Default, Serialize, Deserialize)]
        struct Textual {
            id: String,
            email: u64,
        }
        let stored = Stored {
            id: 2,
            email: "d@x.com".into(),
            internal_rank: 0,
        };
        let result: Result<Textual, _> = convert_one(&stored);
        assert!(matches!(result, Err(RepoError::ConversionFailure(_))));
    }

    #[test]
    fn convert_many_drops_undefined_elements_silently() {
        let sources = vec![
            Some(Stored {
                id: 1,
                email: "a@x.com".into(),
                internal_rank: 0,
            }),
            None,
            Some(Stored {
                id: 2,
                email: "b@x.com".into(),
                internal_rank: 0,
            }),
        ];
        let dtos: Vec<Dto> = convert_many(&sources).unwrap();
        assert_eq!(dtos.len(), 2);
        assert_eq!(dtos[0].id, 1);
        assert_eq!(dtos[1].id, 2);
    }
}
