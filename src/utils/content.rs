//! 文章内容的纯函数处理：纯文本提取、SEO 描述截断和阅读时间估算。
//!
//! 这些函数没有共享状态，可以在任意请求任务中直接调用。

use crate::models::article::{
    ArticleContent, ContentFormat, DEFAULT_META_DESCRIPTION_LENGTH, ELLIPSIS, WORDS_PER_MINUTE,
    WORD_BOUNDARY_RATIO,
};
use crate::utils::markdown;

/// 把任意形式的文章内容转换为纯文本
pub fn to_plain_text(content: &ArticleContent, format: ContentFormat) -> String {
    match content {
        ArticleContent::Blocks(blocks) => markdown::strip_markup(&markdown::flatten_blocks(blocks)),
        ArticleContent::Text(text) => match format {
            ContentFormat::Html => markdown::strip_markup(text),
            ContentFormat::Markdown => markdown::to_text(text),
        },
    }
}

/// 生成 SEO 描述，结果最多 `max_length` 个字符再加省略标记
pub fn generate_meta_description(content: &ArticleContent, max_length: usize) -> String {
    let text = to_plain_text(content, ContentFormat::Html);
    truncate_at_word_boundary(&text, max_length)
}

/// 使用默认长度生成 SEO 描述
pub fn default_meta_description(content: &ArticleContent) -> String {
    generate_meta_description(content, DEFAULT_META_DESCRIPTION_LENGTH)
}

/// 按字符截断文本。
///
/// 窗口内最后一个空格位于 `0.7 * max_length` 之后时在空格处截断，
/// 否则在 `max_length` 处硬截断。只要发生截断就追加 `...`。
pub fn truncate_at_word_boundary(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let window: String = text.chars().take(max_length).collect();
    let threshold = max_length as f64 * WORD_BOUNDARY_RATIO;

    let cut = match window.rfind(' ') {
        Some(byte_idx) if window[..byte_idx].chars().count() as f64 > threshold => &window[..byte_idx],
        _ => window.as_str(),
    };

    format!("{}{}", cut, ELLIPSIS)
}

/// 估算阅读时间（分钟），按 225 词/分钟向上取整，至少 1 分钟
pub fn calculate_reading_time(content: &ArticleContent) -> u32 {
    let text = to_plain_text(content, ContentFormat::Html);
    reading_time_for_words(markdown::count_words(&text), WORDS_PER_MINUTE)
}

pub fn reading_time_for_words(word_count: usize, words_per_minute: usize) -> u32 {
    let words_per_minute = words_per_minute.max(1);
    let minutes = (word_count + words_per_minute - 1) / words_per_minute;
    minutes.max(1) as u32
}
