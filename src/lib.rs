//! Rainbow Blog 的互动计数与内容规范化。
//!
//! - [`services::clap`]：带上限的鼓掌累加
//! - [`services::bookmark`] / [`services::follow`]：幂等的书签与关注切换
//! - [`utils::slug`] / [`utils::content`]：slug、SEO 描述和阅读时间的纯函数

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
pub use state::AppState;
