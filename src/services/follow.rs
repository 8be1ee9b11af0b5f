use crate::{
    error::{AppError, Result},
    models::follow::{FollowState, FollowStats},
    services::storage::RelationStore,
    utils::validation::validate_identifier,
};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct FollowService {
    store: Arc<dyn RelationStore>,
}

impl FollowService {
    pub fn new(store: Arc<dyn RelationStore>) -> Self {
        Self { store }
    }

    pub async fn follow_user(&self, follower_id: &str, following_id: &str) -> Result<FollowState> {
        debug!("User {} following user {}", follower_id, following_id);
        self.validate_pair(follower_id, following_id)?;

        if self.store.insert(follower_id, following_id).await? {
            info!("User {} followed user {}", follower_id, following_id);
        }

        self.state(true, following_id).await
    }

    pub async fn unfollow_user(&self, follower_id: &str, following_id: &str) -> Result<FollowState> {
        debug!("User {} unfollowing user {}", follower_id, following_id);
        self.validate_pair(follower_id, following_id)?;

        if self.store.remove(follower_id, following_id).await? {
            info!("User {} unfollowed user {}", follower_id, following_id);
        }

        self.state(false, following_id).await
    }

    pub async fn toggle_follow(&self, follower_id: &str, following_id: &str) -> Result<FollowState> {
        if self.is_following(follower_id, following_id).await? {
            self.unfollow_user(follower_id, following_id).await
        } else {
            self.follow_user(follower_id, following_id).await
        }
    }

    pub async fn is_following(&self, follower_id: &str, following_id: &str) -> Result<bool> {
        Ok(self.store.contains(follower_id, following_id).await?)
    }

    pub async fn get_follow_stats(&self, user_id: &str) -> Result<FollowStats> {
        validate_identifier("user_id", user_id)?;

        Ok(FollowStats {
            follower_count: self.store.count_by_target(user_id).await?,
            following_count: self.store.count_by_subject(user_id).await?,
        })
    }

    fn validate_pair(&self, follower_id: &str, following_id: &str) -> Result<()> {
        validate_identifier("follower_id", follower_id)?;
        validate_identifier("following_id", following_id)?;

        // 防止自己关注自己
        if follower_id == following_id {
            return Err(AppError::Validation("Cannot follow yourself".to_string()));
        }

        Ok(())
    }

    async fn state(&self, following: bool, following_id: &str) -> Result<FollowState> {
        Ok(FollowState {
            following,
            follower_count: self.store.count_by_target(following_id).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::{InMemoryRelationStore, MockRelationStore, StorageError};

    fn service() -> FollowService {
        FollowService::new(Arc::new(InMemoryRelationStore::new()))
    }

    #[tokio::test]
    async fn test_follow_is_idempotent() {
        let service = service();

        service.follow_user("alice", "bob").await.unwrap();
        let state = service.follow_user("alice", "bob").await.unwrap();

        assert_eq!(state, FollowState { following: true, follower_count: 1 });
    }

    #[tokio::test]
    async fn test_unfollow_is_idempotent() {
        let service = service();
        service.follow_user("alice", "bob").await.unwrap();

        service.unfollow_user("alice", "bob").await.unwrap();
        let state = service.unfollow_user("alice", "bob").await.unwrap();

        assert_eq!(state, FollowState { following: false, follower_count: 0 });
    }

    #[tokio::test]
    async fn test_cannot_follow_yourself() {
        let service = service();
        let err = service.follow_user("alice", "alice").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_toggle_and_stats() {
        let service = service();
        service.follow_user("alice", "bob").await.unwrap();
        service.follow_user("carol", "bob").await.unwrap();
        service.follow_user("bob", "carol").await.unwrap();

        let stats = service.get_follow_stats("bob").await.unwrap();
        assert_eq!(stats, FollowStats { follower_count: 2, following_count: 1 });

        let state = service.toggle_follow("alice", "bob").await.unwrap();
        assert!(!state.following);
        assert_eq!(state.follower_count, 1);

        let state = service.toggle_follow("alice", "bob").await.unwrap();
        assert!(state.following);
        assert!(service.is_following("alice", "bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_storage_failures() {
        let mut store = MockRelationStore::new();
        store
            .expect_insert()
            .returning(|_, _| Err(StorageError::Unavailable("connection reset".to_string())));
        store
            .expect_count_by_target()
            .returning(|_| Err(StorageError::Unavailable("connection reset".to_string())));

        let service = FollowService::new(Arc::new(store));

        let err = service.follow_user("alice", "bob").await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));

        let err = service.get_follow_stats("bob").await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
    }
}
