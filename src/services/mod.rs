pub mod article;
pub mod bookmark;
pub mod clap;
pub mod follow;
pub mod storage;

// 重新导出常用类型
pub use article::ArticleService;
pub use bookmark::BookmarkService;
pub use clap::ClapService;
pub use follow::FollowService;
pub use storage::{ClapStore, InMemoryClapStore, InMemoryRelationStore, RelationStore, StorageError};
