use serde::{Deserialize, Serialize};

/// 关注操作之后的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowState {
    pub following: bool,
    pub follower_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowStats {
    pub follower_count: u64,
    pub following_count: u64,
}
