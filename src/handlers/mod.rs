// src/handlers/mod.rs

use uuid::Uuid;

use crate::error::PostError;

pub mod community;
pub mod interaction;

/// Post ids in paths are UUIDs; anything else cannot name a post.
pub(crate) fn parse_post_id(raw: &str) -> Result<Uuid, PostError> {
    Uuid::parse_str(raw).map_err(|_| PostError::PostNotFound)
}
