use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// 阅读速度（词/分钟），用于估算阅读时间
pub const WORDS_PER_MINUTE: usize = 225;

/// SEO 描述的默认最大长度（字符），与搜索结果摘要的常见截断长度一致
pub const DEFAULT_META_DESCRIPTION_LENGTH: usize = 160;

/// 截断后追加的省略标记
pub const ELLIPSIS: &str = "...";

/// 截断点处的空格必须落在窗口的后 30% 内，否则直接硬截断
pub const WORD_BOUNDARY_RATIO: f64 = 0.7;

/// 文本内容的标记格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    /// 纯文本或 HTML
    #[default]
    Html,
    Markdown,
}

/// 编辑器产出的结构化内容块，例如 `{"type": "paragraph", "data": {"text": "..."}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub data: Value,
}

/// 文章原始内容：字符串或结构化块列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl Default for ArticleContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for ArticleContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ArticleContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NormalizeArticleRequest {
    #[validate(length(max = 150))]
    pub title: String,

    #[serde(default)]
    pub content: ArticleContent,

    #[serde(default)]
    pub format: ContentFormat,

    /// 标题无法生成 slug 时使用的标识
    pub article_id: Option<String>,

    /// 已被占用的 slug，生成结果会避开它们
    #[serde(default)]
    pub existing_slugs: Vec<String>,

    #[validate(range(min = 1, max = 1000))]
    pub meta_description_max_length: Option<usize>,
}

/// 由标题和正文派生出的值，由文章持久化一方负责保存
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedContent {
    pub slug: String,
    pub meta_description: String,
    pub reading_time_minutes: u32,
    pub word_count: usize,
}
