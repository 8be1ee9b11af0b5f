use crate::{
    error::Result,
    models::clap::{ArticleClapSummary, ClapRecord, ClapResponse, MAX_CLAPS_PER_USER},
    services::storage::ClapStore,
    utils::validation::{validate_clap_delta, validate_identifier},
};
use std::sync::Arc;
use tracing::{debug, info};

/// 鼓掌累加器
///
/// 每个用户对每篇文章的鼓掌数被限制在 `max_claps_per_user` 以内。到达上限后
/// 继续鼓掌仍然成功，只是计数不再变化；是否还能鼓掌由 `can_user_clap` 告知调用方。
#[derive(Clone)]
pub struct ClapService {
    store: Arc<dyn ClapStore>,
    max_claps_per_user: i32,
}

impl ClapService {
    pub fn new(store: Arc<dyn ClapStore>) -> Self {
        Self::with_limit(store, MAX_CLAPS_PER_USER)
    }

    pub fn with_limit(store: Arc<dyn ClapStore>, max_claps_per_user: i32) -> Self {
        Self {
            store,
            max_claps_per_user: max_claps_per_user.max(1),
        }
    }

    pub fn max_claps_per_user(&self) -> i32 {
        self.max_claps_per_user
    }

    /// 为文章添加鼓掌
    pub async fn add_clap(&self, user_id: &str, article_id: &str, delta: i32) -> Result<ClapResponse> {
        debug!("User {} clapping article {} with count {}", user_id, article_id, delta);

        validate_identifier("user_id", user_id)?;
        validate_identifier("article_id", article_id)?;
        validate_clap_delta(delta)?;

        let update = self
            .store
            .upsert_clamped(user_id, article_id, delta, self.max_claps_per_user)
            .await?;

        let applied = update.record.count - update.previous_count;
        let clamped = applied < delta;
        if clamped {
            debug!(
                "Clap delta for user {} on article {} clamped from {} to {}",
                user_id, article_id, delta, applied
            );
        }

        let total_claps = self.store.sum_by_article(article_id).await?;

        info!(
            "User {} now has {} claps on article {} (total {})",
            user_id, update.record.count, article_id, total_claps
        );

        Ok(ClapResponse {
            user_clap_count: update.record.count,
            total_claps,
            clamped,
        })
    }

    /// 撤销用户在文章上的全部鼓掌
    pub async fn remove_clap(&self, user_id: &str, article_id: &str) -> Result<ClapResponse> {
        debug!("User {} removing claps from article {}", user_id, article_id);

        validate_identifier("user_id", user_id)?;
        validate_identifier("article_id", article_id)?;

        let removed = self.store.remove(user_id, article_id).await?;
        if removed {
            info!("Removed claps of user {} from article {}", user_id, article_id);
        }

        let total_claps = self.store.sum_by_article(article_id).await?;

        Ok(ClapResponse {
            user_clap_count: 0,
            total_claps,
            clamped: false,
        })
    }

    /// 获取用户对文章的鼓掌次数
    pub async fn get_user_clap_count(&self, user_id: &str, article_id: &str) -> Result<i32> {
        let record = self.store.get(user_id, article_id).await?;
        Ok(record.map(|r| r.count).unwrap_or(0))
    }

    /// 获取文章的总鼓掌数
    pub async fn get_article_total_claps(&self, article_id: &str) -> Result<i64> {
        Ok(self.store.sum_by_article(article_id).await?)
    }

    pub async fn can_user_clap(&self, user_id: &str, article_id: &str) -> Result<bool> {
        let count = self.get_user_clap_count(user_id, article_id).await?;
        Ok(count < self.max_claps_per_user)
    }

    pub async fn get_article_clappers(&self, article_id: &str) -> Result<Vec<ClapRecord>> {
        Ok(self.store.list_by_article(article_id).await?)
    }

    /// 文章鼓掌概况；提供 viewer 时附带其个人计数
    pub async fn get_article_summary(
        &self,
        article_id: &str,
        viewer_user_id: Option<&str>,
    ) -> Result<ArticleClapSummary> {
        validate_identifier("article_id", article_id)?;

        let clappers = self.store.list_by_article(article_id).await?;
        let total_claps: i64 = clappers.iter().map(|r| r.count as i64).sum();

        let (user_clap_count, can_clap) = match viewer_user_id {
            Some(user_id) => {
                let count = clappers
                    .iter()
                    .find(|r| r.user_id == user_id)
                    .map(|r| r.count)
                    .unwrap_or(0);
                (Some(count), Some(count < self.max_claps_per_user))
            }
            None => (None, None),
        };

        Ok(ArticleClapSummary {
            article_id: article_id.to_string(),
            total_claps,
            clapper_count: clappers.len(),
            user_clap_count,
            can_clap,
        })
    }
}

impl std::fmt::Debug for ClapService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClapService")
            .field("max_claps_per_user", &self.max_claps_per_user)
            .finish_non_exhaustive()
    }
}
