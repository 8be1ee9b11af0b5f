use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use validator::Validate;

/// 单个用户对单篇文章可累积的最大鼓掌数。
///
/// 上限让单个读者无法主导文章的热度信号，同时保留"多次鼓掌"的分级表达。
pub const MAX_CLAPS_PER_USER: i32 = 50;

/// 某个用户在某篇文章上累积的鼓掌记录，每个 (user_id, article_id) 至多一条
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClapRecord {
    pub user_id: String,
    pub article_id: String,
    pub count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClapRecord {
    pub fn new(user_id: &str, article_id: &str, count: i32) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.to_string(),
            article_id: article_id.to_string(),
            count,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddClapRequest {
    #[validate(range(min = 1, message = "Clap count must be a positive integer"))]
    pub count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClapResponse {
    pub user_clap_count: i32,
    pub total_claps: i64,
    /// 请求的增量被上限截断时为 true
    pub clamped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleClapSummary {
    pub article_id: String,
    pub total_claps: i64,
    pub clapper_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_clap_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_clap: Option<bool>,
}
