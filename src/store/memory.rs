use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{PostError, StoreError, UpdateError},
    models::post::Post,
    store::{Guard, Mutation, PostStore},
};

/// In-process store used by tests and by local runs without `DATABASE_URL`.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: &Post) -> Result<(), StoreError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, mutation: Mutation<'_>) -> Result<Post, UpdateError> {
        let mut posts = self.posts.write().await;
        let current = posts.get(&id).cloned().ok_or(PostError::PostNotFound)?;

        let next = mutation(current)?;
        posts.insert(id, next.clone());
        Ok(next)
    }

    async fn remove(&self, id: Uuid, guard: Guard<'_>) -> Result<(), UpdateError> {
        let mut posts = self.posts.write().await;
        let post = posts.get(&id).ok_or(PostError::PostNotFound)?;

        guard(post)?;
        posts.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{engine, models::post::Draft, store::load_post};

    async fn seeded() -> (MemoryPostStore, Post) {
        let store = MemoryPostStore::new();
        let post = engine::create_post("u1", Draft::new("hello")).unwrap();
        store.insert(&post).await.unwrap();
        (store, post)
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryPostStore::new();
        assert!(store.list().await.unwrap().is_empty());

        let mut older = engine::create_post("u1", Draft::new("older")).unwrap();
        older.created_at -= chrono::Duration::minutes(5);
        let newer = engine::create_post("u1", Draft::new("newer")).unwrap();
        store.insert(&older).await.unwrap();
        store.insert(&newer).await.unwrap();

        let texts: Vec<_> = store.list().await.unwrap().into_iter().map(|p| p.text).collect();
        assert_eq!(texts, ["newer", "older"]);
    }

    #[tokio::test]
    async fn rejected_update_writes_nothing() {
        let (store, post) = seeded().await;

        let err = store
            .update(post.id, &|p| engine::remove_like(p, "u2"))
            .await
            .unwrap_err();
        assert!(matches!(err, UpdateError::Rejected(PostError::NotLiked)));
        assert_eq!(store.find(post.id).await.unwrap(), Some(post));
    }

    #[tokio::test]
    async fn update_on_missing_post_is_not_found() {
        let store = MemoryPostStore::new();
        let err = store
            .update(Uuid::new_v4(), &|p| engine::add_like(p, "u2"))
            .await
            .unwrap_err();
        assert!(matches!(err, UpdateError::Rejected(PostError::PostNotFound)));

        let err = load_post(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, UpdateError::Rejected(PostError::PostNotFound)));
    }

    #[tokio::test]
    async fn remove_respects_guard() {
        let (store, post) = seeded().await;

        let err = store
            .remove(post.id, &|p| engine::delete_post(p, "u2").map(|_| ()))
            .await
            .unwrap_err();
        assert!(matches!(err, UpdateError::Rejected(PostError::NotAuthorized)));
        assert!(store.find(post.id).await.unwrap().is_some());

        store
            .remove(post.id, &|p| engine::delete_post(p, "u1").map(|_| ()))
            .await
            .unwrap();
        assert!(store.find(post.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_comments_are_not_lost() {
        let (store, post) = seeded().await;
        let store = Arc::new(store);
        let id = post.id;

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let user = format!("user-{i}");
                    store
                        .update(id, &|p| {
                            engine::add_comment(p, &user, Draft::new(format!("comment {i}")))
                        })
                        .await
                        .unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let post = store.find(id).await.unwrap().unwrap();
        assert_eq!(post.comments.len(), 32);
    }
}
