// src/store/mod.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::{PostError, StoreError, UpdateError},
    models::post::Post,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryPostStore;
pub use postgres::PgPostStore;

/// A mutation applied to a loaded post, usually one of the `engine` functions.
pub type Mutation<'a> = &'a (dyn Fn(Post) -> Result<Post, PostError> + Send + Sync);

/// A check that must pass before a post is removed.
pub type Guard<'a> = &'a (dyn Fn(&Post) -> Result<(), PostError> + Send + Sync);

/// Persistence port for post documents.
///
/// `update` and `remove` run their closure while the document is locked, so
/// two concurrent mutations of the same post never overwrite each other.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, newest first.
    async fn list(&self) -> Result<Vec<Post>, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    async fn insert(&self, post: &Post) -> Result<(), StoreError>;

    /// Loads the post, applies `mutation` and persists the result atomically.
    /// Nothing is written when the mutation is rejected.
    async fn update(&self, id: Uuid, mutation: Mutation<'_>) -> Result<Post, UpdateError>;

    /// Deletes the post if `guard` accepts it.
    async fn remove(&self, id: Uuid, guard: Guard<'_>) -> Result<(), UpdateError>;
}

/// Fetches one post or rejects with `PostNotFound`.
pub async fn load_post(store: &dyn PostStore, id: Uuid) -> Result<Post, UpdateError> {
    store
        .find(id)
        .await?
        .ok_or(UpdateError::Rejected(PostError::PostNotFound))
}
