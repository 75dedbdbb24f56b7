use serde::{Deserialize, Serialize};

/// A post, keyed by a plain integer rather than a GUID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub text: String,
}
