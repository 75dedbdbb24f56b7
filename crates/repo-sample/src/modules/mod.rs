//! Domain modules: typed wrappers over the generic repository, one per
//! resource. Each module picks its identity selector, adds domain
//! validation, and maps framework errors into its own error type.

pub mod post;
pub mod user;

pub use post::PostModule;
pub use user::{UserError, UserModule};
