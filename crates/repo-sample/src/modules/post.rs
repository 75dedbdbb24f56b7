//! # Post Module
//!
//! Thin wrapper over `Repository<Post, PostDto>`; posts need no domain
//! validation, so framework errors pass through unchanged.

use crate::dto::PostDto;
use crate::model::Post;
use async_trait::async_trait;
use repo_framework::{KeySelector, RepoError, RepoModule, Repository, StorageContext};

pub struct PostModule {
    repo: Repository<Post, PostDto>,
}

impl PostModule {
    /// Binds to the post collection; the identity is declared by field name.
    pub fn new(context: &StorageContext) -> Result<Self, RepoError> {
        let repo = Repository::new(context, KeySelector::field("id"))?;
        Ok(Self { repo })
    }

    pub async fn publish(&self, dto: PostDto) -> Result<PostDto, RepoError> {
        self.repo.add(dto).await
    }

    pub async fn edit(&self, dto: PostDto) -> Result<PostDto, RepoError> {
        self.repo.update(dto).await
    }
}

#[async_trait]
impl RepoModule<Post, PostDto> for PostModule {
    type Error = RepoError;

    fn repo(&self) -> &Repository<Post, PostDto> {
        &self.repo
    }

    fn map_error(e: RepoError) -> Self::Error {
        e
    }
}
