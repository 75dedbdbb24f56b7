//! Transfer models exchanged across the system boundary.
//!
//! Structurally similar to the storage models but independently defined: no
//! shared trait, no `From` impls. Only the field names relate each DTO to
//! its storage twin, and every conversion produces a fresh instance owned by
//! the caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostDto {
    pub id: i32,
    pub text: String,
}
