use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::models::clap::ClapRecord;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage operation `{operation}` failed")]
    Backend {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// `upsert_clamped` 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClapUpdate {
    /// 本次更新之前的计数，记录不存在时为 0
    pub previous_count: i32,
    pub record: ClapRecord,
}

/// 鼓掌记录的持久化接口
///
/// `upsert_clamped` 必须是针对单个 (user_id, article_id) 的原子读-改-写，
/// 相当于 `count = min(count + delta, max)` 的条件更新。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClapStore: Send + Sync {
    async fn get(&self, user_id: &str, article_id: &str) -> StorageResult<Option<ClapRecord>>;

    async fn upsert_clamped(
        &self,
        user_id: &str,
        article_id: &str,
        delta: i32,
        max: i32,
    ) -> StorageResult<ClapUpdate>;

    /// 删除记录，返回记录此前是否存在
    async fn remove(&self, user_id: &str, article_id: &str) -> StorageResult<bool>;

    async fn sum_by_article(&self, article_id: &str) -> StorageResult<i64>;

    async fn list_by_article(&self, article_id: &str) -> StorageResult<Vec<ClapRecord>>;
}

/// 基于 DashMap 的鼓掌存储，按文章分片
///
/// 同一篇文章的所有更新都在该文章条目的写锁下完成。
#[derive(Debug, Default, Clone)]
pub struct InMemoryClapStore {
    claps: Arc<DashMap<String, HashMap<String, ClapRecord>>>,
}

impl InMemoryClapStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClapStore for InMemoryClapStore {
    async fn get(&self, user_id: &str, article_id: &str) -> StorageResult<Option<ClapRecord>> {
        Ok(self
            .claps
            .get(article_id)
            .and_then(|users| users.get(user_id).cloned()))
    }

    async fn upsert_clamped(
        &self,
        user_id: &str,
        article_id: &str,
        delta: i32,
        max: i32,
    ) -> StorageResult<ClapUpdate> {
        let mut users = self.claps.entry(article_id.to_string()).or_default();

        let update = match users.get_mut(user_id) {
            Some(record) => {
                let previous_count = record.count;
                // 上限下调后已有记录保持原值，加法永不减少计数
                let next = previous_count
                    .saturating_add(delta)
                    .min(max)
                    .max(previous_count);
                if next != previous_count {
                    record.count = next;
                    record.updated_at = Utc::now();
                }
                ClapUpdate {
                    previous_count,
                    record: record.clone(),
                }
            }
            None => {
                let record = ClapRecord::new(user_id, article_id, delta.min(max));
                users.insert(user_id.to_string(), record.clone());
                ClapUpdate {
                    previous_count: 0,
                    record,
                }
            }
        };

        debug!(
            user_id,
            article_id,
            previous = update.previous_count,
            current = update.record.count,
            "Upserted clap record"
        );
        Ok(update)
    }

    async fn remove(&self, user_id: &str, article_id: &str) -> StorageResult<bool> {
        let removed = match self.claps.get_mut(article_id) {
            Some(mut users) => users.remove(user_id).is_some(),
            None => false,
        };

        self.claps.remove_if(article_id, |_, users| users.is_empty());
        Ok(removed)
    }

    async fn sum_by_article(&self, article_id: &str) -> StorageResult<i64> {
        Ok(self
            .claps
            .get(article_id)
            .map(|users| users.values().map(|r| r.count as i64).sum())
            .unwrap_or(0))
    }

    async fn list_by_article(&self, article_id: &str) -> StorageResult<Vec<ClapRecord>> {
        let mut records: Vec<ClapRecord> = self
            .claps
            .get(article_id)
            .map(|users| users.values().cloned().collect())
            .unwrap_or_default();
        records.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(records)
    }
}

/// 主体到目标的二元关系（书签：用户 → 文章，关注：关注者 → 被关注者）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationStore: Send + Sync {
    /// 插入关系，返回是否为新插入
    async fn insert(&self, subject: &str, target: &str) -> StorageResult<bool>;

    /// 删除关系，返回关系此前是否存在
    async fn remove(&self, subject: &str, target: &str) -> StorageResult<bool>;

    async fn contains(&self, subject: &str, target: &str) -> StorageResult<bool>;

    async fn count_by_target(&self, target: &str) -> StorageResult<u64>;

    async fn count_by_subject(&self, subject: &str) -> StorageResult<u64>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryRelationStore {
    by_target: Arc<DashMap<String, HashSet<String>>>,
}

impl InMemoryRelationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RelationStore for InMemoryRelationStore {
    async fn insert(&self, subject: &str, target: &str) -> StorageResult<bool> {
        Ok(self
            .by_target
            .entry(target.to_string())
            .or_default()
            .insert(subject.to_string()))
    }

    async fn remove(&self, subject: &str, target: &str) -> StorageResult<bool> {
        let removed = match self.by_target.get_mut(target) {
            Some(mut subjects) => subjects.remove(subject),
            None => false,
        };

        self.by_target.remove_if(target, |_, subjects| subjects.is_empty());
        Ok(removed)
    }

    async fn contains(&self, subject: &str, target: &str) -> StorageResult<bool> {
        Ok(self
            .by_target
            .get(target)
            .map(|subjects| subjects.contains(subject))
            .unwrap_or(false))
    }

    async fn count_by_target(&self, target: &str) -> StorageResult<u64> {
        Ok(self
            .by_target
            .get(target)
            .map(|subjects| subjects.len() as u64)
            .unwrap_or(0))
    }

    async fn count_by_subject(&self, subject: &str) -> StorageResult<u64> {
        Ok(self
            .by_target
            .iter()
            .filter(|entry| entry.value().contains(subject))
            .count() as u64)
    }
}
