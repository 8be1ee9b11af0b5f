use regex::Regex;
use once_cell::sync::Lazy;

static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9-]").expect("valid slug character class")
});

static CONSECUTIVE_HYPHENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-{2,}").expect("valid hyphen run pattern")
});

static VALID_SLUG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid slug shape pattern")
});

/// 从标题生成 URL 友好的 slug
///
/// 输出只包含 `[a-z0-9-]`，首尾没有连字符，也没有连续的连字符。
/// 全是符号或空白的输入返回空字符串，由调用方决定回退策略。
pub fn create_slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let trimmed = lowered.trim();

    let slug = NON_SLUG_CHARS.replace_all(trimmed, "-");
    let slug = CONSECUTIVE_HYPHENS.replace_all(&slug, "-");

    slug.trim_matches('-').to_string()
}

/// 标题无法产生 slug 时，退回到基于标识的 slug
pub fn slug_or_fallback(title: &str, fallback_id: &str) -> String {
    let slug = create_slug(title);
    if !slug.is_empty() {
        return slug;
    }

    let id_slug = create_slug(fallback_id);
    if id_slug.is_empty() {
        "article".to_string()
    } else {
        format!("article-{}", id_slug)
    }
}

/// 为 slug 添加唯一后缀（如果需要的话）
pub fn make_slug_unique(base_slug: &str, existing_slugs: &[String]) -> String {
    let mut slug = base_slug.to_string();
    let mut counter = 1;

    while existing_slugs.iter().any(|s| s == &slug) {
        slug = format!("{}-{}", base_slug, counter);
        counter += 1;
    }

    slug
}

/// 验证 slug 格式是否正确
pub fn is_valid_slug(slug: &str) -> bool {
    VALID_SLUG.is_match(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_slug() {
        assert_eq!(create_slug("Hello World"), "hello-world");
        assert_eq!(create_slug("This is a Test!"), "this-is-a-test");
        assert_eq!(create_slug("Special Characters @#$%"), "special-characters");
        assert_eq!(create_slug("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(create_slug("Article with Numbers 123"), "article-with-numbers-123");
        assert_eq!(create_slug("Punctuation: Test, Article!"), "punctuation-test-article");
    }

    #[test]
    fn test_create_slug_degenerate_input() {
        assert_eq!(create_slug(""), "");
        assert_eq!(create_slug("   "), "");
        assert_eq!(create_slug("---"), "");
        assert_eq!(create_slug("@#$%"), "");
        assert_eq!(create_slug("  --Rust--  "), "rust");
        assert_eq!(create_slug("Café au lait"), "caf-au-lait");
        assert_eq!(create_slug("snake_case_title"), "snake-case-title");
    }

    #[test]
    fn test_create_slug_is_idempotent() {
        for title in ["Hello World", "  Mixed -- CASE!! 42 ", "已经 slug-ok"] {
            let once = create_slug(title);
            assert_eq!(create_slug(&once), once);
        }
    }

    #[test]
    fn test_slug_or_fallback() {
        assert_eq!(slug_or_fallback("Hello World", "abc"), "hello-world");
        assert_eq!(slug_or_fallback("!!!", "42"), "article-42");
        assert_eq!(slug_or_fallback("!!!", "???"), "article");
    }

    #[test]
    fn test_make_slug_unique() {
        let existing = vec![
            "hello-world".to_string(),
            "hello-world-1".to_string(),
            "hello-world-2".to_string(),
        ];

        assert_eq!(make_slug_unique("hello-world", &existing), "hello-world-3");
        assert_eq!(make_slug_unique("new-post", &existing), "new-post");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("hello-world"));
        assert!(is_valid_slug("hello123"));

        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-hello"));
        assert!(!is_valid_slug("hello-"));
        assert!(!is_valid_slug("hello--world"));
        assert!(!is_valid_slug("hello world"));
        assert!(!is_valid_slug("Hello"));
        assert!(!is_valid_slug("hello_world"));
    }
}
