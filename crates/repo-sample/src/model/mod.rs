//! Storage models, the types the backend owns. Mutated only through
//! repository write operations.

pub mod post;
pub mod user;

pub use post::Post;
pub use user::User;
