use serde::{Deserialize, Serialize};

/// 书签操作之后的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkState {
    pub bookmarked: bool,
    pub bookmark_count: u64,
}
