use async_trait::async_trait;
use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use crate::{
    error::{PostError, StoreError, UpdateError},
    models::post::Post,
    store::{Guard, Mutation, PostStore},
};

/// Posts stored one JSONB document per row.
///
/// `update` and `remove` lock the row with `SELECT ... FOR UPDATE` for the
/// whole load/mutate/save cycle.
#[derive(Debug, Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let rows: Vec<(Json<Post>,)> =
            sqlx::query_as("SELECT document FROM posts ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to list posts: {:?}", e);
                    StoreError::from(e)
                })?;

        Ok(rows.into_iter().map(|(Json(post),)| post).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let row: Option<(Json<Post>,)> =
            sqlx::query_as("SELECT document FROM posts WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(Json(post),)| post))
    }

    async fn insert(&self, post: &Post) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, created_at, document)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(post.id)
        .bind(&post.author_id)
        .bind(post.created_at)
        .bind(Json(post))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create post: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(())
    }

    async fn update(&self, id: Uuid, mutation: Mutation<'_>) -> Result<Post, UpdateError> {
        let mut tx = self.pool.begin().await?;

        let (Json(current),): (Json<Post>,) =
            sqlx::query_as("SELECT document FROM posts WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(PostError::PostNotFound)?;

        // Dropping `tx` on rejection rolls back and releases the row lock.
        let next = mutation(current)?;

        sqlx::query("UPDATE posts SET document = $2 WHERE id = $1")
            .bind(id)
            .bind(Json(&next))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(next)
    }

    async fn remove(&self, id: Uuid, guard: Guard<'_>) -> Result<(), UpdateError> {
        let mut tx = self.pool.begin().await?;

        let (Json(post),): (Json<Post>,) =
            sqlx::query_as("SELECT document FROM posts WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(PostError::PostNotFound)?;

        guard(&post)?;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
