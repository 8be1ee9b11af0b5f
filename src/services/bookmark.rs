use crate::{
    error::Result,
    models::bookmark::BookmarkState,
    services::storage::RelationStore,
    utils::validation::validate_identifier,
};
use std::sync::Arc;
use tracing::{debug, info};

/// 书签服务：添加和移除都是幂等的
#[derive(Clone)]
pub struct BookmarkService {
    store: Arc<dyn RelationStore>,
}

impl BookmarkService {
    pub fn new(store: Arc<dyn RelationStore>) -> Self {
        Self { store }
    }

    pub async fn add_bookmark(&self, user_id: &str, article_id: &str) -> Result<BookmarkState> {
        debug!("Bookmarking article: {} by user: {}", article_id, user_id);
        validate_identifier("user_id", user_id)?;
        validate_identifier("article_id", article_id)?;

        if self.store.insert(user_id, article_id).await? {
            info!("User {} bookmarked article {}", user_id, article_id);
        }

        self.state(true, article_id).await
    }

    pub async fn remove_bookmark(&self, user_id: &str, article_id: &str) -> Result<BookmarkState> {
        debug!("Removing bookmark on article: {} by user: {}", article_id, user_id);
        validate_identifier("user_id", user_id)?;
        validate_identifier("article_id", article_id)?;

        if self.store.remove(user_id, article_id).await? {
            info!("User {} removed bookmark on article {}", user_id, article_id);
        }

        self.state(false, article_id).await
    }

    pub async fn toggle_bookmark(&self, user_id: &str, article_id: &str) -> Result<BookmarkState> {
        if self.is_bookmarked(user_id, article_id).await? {
            self.remove_bookmark(user_id, article_id).await
        } else {
            self.add_bookmark(user_id, article_id).await
        }
    }

    pub async fn is_bookmarked(&self, user_id: &str, article_id: &str) -> Result<bool> {
        Ok(self.store.contains(user_id, article_id).await?)
    }

    pub async fn article_bookmark_count(&self, article_id: &str) -> Result<u64> {
        Ok(self.store.count_by_target(article_id).await?)
    }

    /// 查询状态，未登录用户只返回计数
    pub async fn get_state(&self, user_id: Option<&str>, article_id: &str) -> Result<BookmarkState> {
        let bookmarked = match user_id {
            Some(user_id) => self.is_bookmarked(user_id, article_id).await?,
            None => false,
        };
        self.state(bookmarked, article_id).await
    }

    async fn state(&self, bookmarked: bool, article_id: &str) -> Result<BookmarkState> {
        Ok(BookmarkState {
            bookmarked,
            bookmark_count: self.article_bookmark_count(article_id).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::storage::{InMemoryRelationStore, MockRelationStore, StorageError};

    fn service() -> BookmarkService {
        BookmarkService::new(Arc::new(InMemoryRelationStore::new()))
    }

    #[tokio::test]
    async fn test_add_bookmark_is_idempotent() {
        let service = service();

        let first = service.add_bookmark("u1", "a1").await.unwrap();
        let second = service.add_bookmark("u1", "a1").await.unwrap();

        assert_eq!(first, BookmarkState { bookmarked: true, bookmark_count: 1 });
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_remove_bookmark_is_idempotent() {
        let service = service();
        service.add_bookmark("u1", "a1").await.unwrap();
        service.add_bookmark("u2", "a1").await.unwrap();

        let state = service.remove_bookmark("u1", "a1").await.unwrap();
        assert_eq!(state, BookmarkState { bookmarked: false, bookmark_count: 1 });

        let state = service.remove_bookmark("u1", "a1").await.unwrap();
        assert_eq!(state.bookmark_count, 1);
    }

    #[tokio::test]
    async fn test_toggle_bookmark() {
        let service = service();

        assert!(service.toggle_bookmark("u1", "a1").await.unwrap().bookmarked);
        assert!(service.is_bookmarked("u1", "a1").await.unwrap());

        let state = service.toggle_bookmark("u1", "a1").await.unwrap();
        assert!(!state.bookmarked);
        assert_eq!(state.bookmark_count, 0);
    }

    #[tokio::test]
    async fn test_get_state_for_anonymous_viewer() {
        let service = service();
        service.add_bookmark("u1", "a1").await.unwrap();

        let state = service.get_state(None, "a1").await.unwrap();
        assert_eq!(state, BookmarkState { bookmarked: false, bookmark_count: 1 });
    }

    #[tokio::test]
    async fn test_storage_failure() {
        let mut store = MockRelationStore::new();
        store
            .expect_insert()
            .returning(|_, _| Err(StorageError::Unavailable("disk full".to_string())));

        let service = BookmarkService::new(Arc::new(store));
        let err = service.add_bookmark("u1", "a1").await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
    }
}
