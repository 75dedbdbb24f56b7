//! # Repo Sample
//!
//! A sample consumer of `repo-framework`: in-memory `Users` and `Posts`
//! collections exposed through domain modules.
//!
//! ## Core Components
//!
//! - **[model]**: Storage models ([`model::User`], [`model::Post`]) owned by
//!   the backend.
//! - **[dto]**: Independently defined transfer models; only field names
//!   relate them to the storage side.
//! - **[modules]**: Typed wrappers ([`modules::UserModule`],
//!   [`modules::PostModule`]) over the generic repository.
//! - **[storage]**: Context construction: collections, session, wiring.
//!
//! The entry point in `main` walks a full create/read/update/delete cycle
//! with `tracing` output (`RUST_LOG=debug` shows every operation).

pub mod dto;
pub mod model;
pub mod modules;
pub mod storage;
