pub mod article;
pub mod bookmark;
pub mod clap;
pub mod follow;
