use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        article::ArticleService,
        bookmark::BookmarkService,
        clap::ClapService,
        follow::FollowService,
        storage::{ClapStore, InMemoryClapStore, InMemoryRelationStore, RelationStore},
    },
};

/// 应用程序的共享状态
/// 包含所有服务和配置的引用
#[derive(Clone)]
pub struct AppState {
    /// 应用配置
    pub config: Config,

    /// 鼓掌服务
    pub clap_service: ClapService,

    /// 内容规范化服务
    pub article_service: ArticleService,

    /// 书签服务
    pub bookmark_service: BookmarkService,

    /// 关注服务
    pub follow_service: FollowService,
}

impl AppState {
    /// 使用给定的存储实现组装服务
    pub fn new(
        config: Config,
        clap_store: Arc<dyn ClapStore>,
        bookmark_store: Arc<dyn RelationStore>,
        follow_store: Arc<dyn RelationStore>,
    ) -> Self {
        Self {
            clap_service: ClapService::with_limit(clap_store, config.max_claps_per_user),
            article_service: ArticleService::new(&config),
            bookmark_service: BookmarkService::new(bookmark_store),
            follow_service: FollowService::new(follow_store),
            config,
        }
    }

    /// 全部使用内存存储
    pub fn in_memory(config: Config) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryClapStore::new()),
            Arc::new(InMemoryRelationStore::new()),
            Arc::new(InMemoryRelationStore::new()),
        )
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.config.is_production()
    }
}
