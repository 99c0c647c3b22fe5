//! In-memory post store for tests and local demos

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{next_post_id, DeleteOutcome, InsertOutcome, PostStore};
use crate::error::DbResult;
use crate::schema::{NewPost, Post};

/// Post store held in a mutex-guarded ordered map.
///
/// Keyed by id, so iteration order is identifier order, same as the
/// `ORDER BY id` the Postgres store uses.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    posts: Mutex<BTreeMap<Uuid, Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts
    pub fn len(&self) -> usize {
        self.posts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn find_many(&self, limit: u32) -> DbResult<Vec<Post>> {
        let posts = self.posts.lock().unwrap_or_else(|e| e.into_inner());
        Ok(posts.values().rev().take(limit as usize).cloned().collect())
    }

    async fn find_first(&self, id: Uuid) -> DbResult<Option<Post>> {
        let posts = self.posts.lock().unwrap_or_else(|e| e.into_inner());
        Ok(posts.get(&id).cloned())
    }

    async fn insert(&self, post: NewPost) -> DbResult<InsertOutcome> {
        let id = next_post_id();
        let row = Post {
            id,
            title: post.title.as_str().to_owned(),
            content: post.content.as_str().to_owned(),
            created_at: Utc::now(),
            updated_at: None,
        };
        self.posts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, row);

        Ok(InsertOutcome { id, row_count: 1 })
    }

    async fn delete(&self, id: Uuid) -> DbResult<DeleteOutcome> {
        let removed = self
            .posts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id);

        Ok(DeleteOutcome {
            row_count: u64::from(removed.is_some()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CreatePostSchema;

    fn new_post(title: &str) -> NewPost {
        CreatePostSchema {
            title: title.into(),
            content: "x".into(),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = MemoryPostStore::new();
        let a = store.insert(new_post("A")).await.unwrap().id;
        let b = store.insert(new_post("B")).await.unwrap().id;
        let c = store.insert(new_post("C")).await.unwrap().id;

        let ids: Vec<Uuid> = store
            .find_many(10)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![c, b, a]);
    }

    #[tokio::test]
    async fn respects_limit() {
        let store = MemoryPostStore::new();
        for i in 0..15 {
            store.insert(new_post(&i.to_string())).await.unwrap();
        }
        let posts = store.find_many(10).await.unwrap();
        assert_eq!(posts.len(), 10);
        assert_eq!(posts[0].title, "14");
    }

    #[tokio::test]
    async fn delete_reports_row_count() {
        let store = MemoryPostStore::new();
        let id = store.insert(new_post("gone")).await.unwrap().id;

        assert_eq!(store.delete(id).await.unwrap().row_count, 1);
        assert_eq!(store.delete(id).await.unwrap().row_count, 0);
        assert!(store.find_first(id).await.unwrap().is_none());
        assert!(store.is_empty());
    }
}
