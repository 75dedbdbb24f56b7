//! # User Module
//!
//! Provides a high-level API over the `User` collection. It wraps a
//! `Repository<User, UserDto>` and exposes domain-specific methods; the
//! standard reads and delete come from [`RepoModule`].

use crate::dto::UserDto;
use crate::model::User;
use async_trait::async_trait;
use repo_framework::{IdentityValue, KeySelector, RepoError, RepoModule, Repository, StorageContext};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Errors surfaced by the user module.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("repository error: {0}")]
    Repository(#[from] RepoError),
}

/// Module for working with users.
pub struct UserModule {
    repo: Repository<User, UserDto>,
}

impl UserModule {
    /// Binds the module to the user collection inside `context`. The model
    /// identity is declared here, via a typed accessor.
    pub fn new(context: &StorageContext) -> Result<Self, RepoError> {
        let repo = Repository::new(
            context,
            KeySelector::accessor("id", |u: &User| IdentityValue::new(u.id)),
        )?;
        Ok(Self { repo })
    }

    /// Registers a new user with a fresh GUID identity.
    #[instrument(skip(self))]
    pub async fn register(&self, email: &str) -> Result<UserDto, UserError> {
        if email.trim().is_empty() {
            return Err(UserError::EmptyEmail);
        }
        debug!("Registering user");
        let dto = UserDto {
            id: Uuid::new_v4(),
            email: email.to_owned(),
        };
        Ok(self.repo.add(dto).await?)
    }

    /// Rewrites the stored email for an existing user. The user must exist.
    #[instrument(skip(self))]
    pub async fn change_email(&self, id: Uuid, email: &str) -> Result<UserDto, UserError> {
        if email.trim().is_empty() {
            return Err(UserError::EmptyEmail);
        }
        debug!("Changing email");
        let dto = UserDto {
            id,
            email: email.to_owned(),
        };
        Ok(self.repo.update(dto).await?)
    }

    /// Finds the single user with the given email address.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<UserDto, UserError> {
        Ok(self.repo.get(|u| u.email == email).await?)
    }
}

#[async_trait]
impl RepoModule<User, UserDto> for UserModule {
    type Error = UserError;

    fn repo(&self) -> &Repository<User, UserDto> {
        &self.repo
    }

    fn map_error(e: RepoError) -> Self::Error {
        UserError::Repository(e)
    }
}
