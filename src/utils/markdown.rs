use pulldown_cmark::{Event, Options, Parser, Tag};
use regex::Regex;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::models::article::ContentBlock;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

static HTML_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment pattern"));

static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid script pattern")
});

static STYLE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("valid style pattern")
});

static BLOCK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)</?(p|div|br|hr|li|ul|ol|h[1-6]|blockquote|pre|table|tr|td|th|section|article|header|footer|figure|figcaption)\b[^>]*>",
    )
    .expect("valid block tag pattern")
});

static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[a-zA-Z][^>]*>").expect("valid tag pattern")
});

/// 结构化块中承载正文的字段，列表项在 items 中，表格单元格在 content 中
const TEXT_FIELDS: &[&str] = &["title", "text", "caption", "message", "code", "content", "items"];

/// 从 Markdown 提取纯文本（用于摘要和字数统计）
pub fn to_text(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);

    let mut text = String::new();
    for event in parser {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::Html(html) => text.push_str(&html),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(Tag::Paragraph)
            | Event::End(Tag::Heading(..))
            | Event::End(Tag::Item)
            | Event::End(Tag::CodeBlock(_))
            | Event::End(Tag::TableCell)
            | Event::End(Tag::BlockQuote) => text.push(' '),
            _ => {}
        }
    }

    collapse_whitespace(&strip_markup(&text))
}

/// 移除 HTML 标记，返回纯文本
///
/// 不含任何标签的输入原样返回，保证纯文本在摘要阶段不被改写。
pub fn strip_markup(input: &str) -> String {
    if !HTML_TAG.is_match(input) && !HTML_COMMENT.is_match(input) {
        return input.to_string();
    }

    let text = HTML_COMMENT.replace_all(input, " ");
    let text = SCRIPT_BLOCK.replace_all(&text, " ");
    let text = STYLE_BLOCK.replace_all(&text, " ");
    // 块级标签视为单词边界，行内标签直接去掉
    let text = BLOCK_TAG.replace_all(&text, " ");
    let text = HTML_TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    collapse_whitespace(&text)
}

/// 把结构化内容块序列化为扁平文本，块之间以空格分隔
pub fn flatten_blocks(blocks: &[ContentBlock]) -> String {
    let mut parts = Vec::new();
    for block in blocks {
        collect_text(&block.data, &mut parts);
    }
    parts.join(" ")
}

fn collect_text(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            if !s.trim().is_empty() {
                out.push(s.clone());
            }
        }
        Value::Array(values) => {
            for v in values {
                collect_text(v, out);
            }
        }
        Value::Object(map) => {
            for field in TEXT_FIELDS {
                if let Some(v) = map.get(*field) {
                    collect_text(v, out);
                }
            }
        }
        _ => {}
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// 计算字数
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
