//! # Field Mapper
//!
//! In-place, name-matched field copying from one value onto another. Where
//! [`convert`](crate::convert) builds a *fresh* target, the mapper rewrites
//! an *existing* one: the update path locates the stored record and applies
//! the DTO's fields over it, leaving unmatched target fields exactly as they
//! were.

use crate::convert::represent;
use crate::error::RepoError;
use crate::model::{short_type_name, Structural};
use serde::Serialize;
use serde_json::Value;

/// Copies every field of `source` onto the same-named (case-insensitive)
/// field of `target`, overwriting the target's current value.
///
/// Source fields with no counterpart on the target are skipped; target
/// fields with no counterpart on the source are left untouched.
pub fn apply_fields<S: Serialize, T: Structural>(
    source: &S,
    target: &mut T,
) -> Result<(), RepoError> {
    let source_repr = represent(source)?;
    let current = serde_json::to_value(&*target)
        .map_err(|e| RepoError::ConversionFailure(e.to_string()))?;
    let mut target_repr = match current {
        Value::Object(map) => map,
        other => {
            return Err(RepoError::ConversionFailure(format!(
                "{} serializes to {other}, not a field map",
                short_type_name::<T>(),
            )))
        }
    };

    for (name, value) in &source_repr {
        // Keep the target's own key casing when overwriting.
        let key = target_repr
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .cloned();
        if let Some(key) = key {
            target_repr.insert(key, value.clone());
        }
    }

    *target = serde_json::from_value(Value::Object(target_repr))
        .map_err(|e| RepoError::ConversionFailure(e.to_string()))?;
    Ok(())
}
