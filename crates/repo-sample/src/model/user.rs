use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user, as the storage backend keeps it.
///
/// The GUID identity mirrors backends that assign globally unique keys;
/// nothing about the framework assumes it, since the identity field is named
/// at repository construction, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
        }
    }
}
