use crate::{
    config::Config,
    error::{AppError, Result},
    models::article::*,
    utils::{content, markdown, slug},
};
use tracing::debug;
use validator::Validate;

/// 文章内容规范化：slug、SEO 描述、阅读时间
///
/// 无状态，结果交给文章持久化一方保存。
#[derive(Debug, Clone)]
pub struct ArticleService {
    meta_description_max_length: usize,
    words_per_minute: usize,
    max_article_length: usize,
}

impl Default for ArticleService {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl ArticleService {
    pub fn new(config: &Config) -> Self {
        Self {
            meta_description_max_length: config.meta_description_max_length,
            words_per_minute: config.reading_words_per_minute,
            max_article_length: config.max_article_length,
        }
    }

    /// 处理来自控制器的规范化请求
    pub fn normalize_article(&self, request: &NormalizeArticleRequest) -> Result<NormalizedContent> {
        request.validate()?;

        let plain_text = content::to_plain_text(&request.content, request.format);
        let length = plain_text.chars().count();
        if length > self.max_article_length {
            return Err(AppError::Validation(format!(
                "Article content is {} characters, maximum is {}",
                length, self.max_article_length
            )));
        }

        let mut article_slug = match &request.article_id {
            Some(id) => slug::slug_or_fallback(&request.title, id),
            None => slug::create_slug(&request.title),
        };
        if !article_slug.is_empty() && !request.existing_slugs.is_empty() {
            article_slug = slug::make_slug_unique(&article_slug, &request.existing_slugs);
        }

        let max_length = request
            .meta_description_max_length
            .unwrap_or(self.meta_description_max_length);

        Ok(self.derive(article_slug, &plain_text, max_length))
    }

    /// 从标题和正文直接派生，不做长度校验
    pub fn normalize(&self, title: &str, article_content: &ArticleContent, format: ContentFormat) -> NormalizedContent {
        let plain_text = content::to_plain_text(article_content, format);
        self.derive(slug::create_slug(title), &plain_text, self.meta_description_max_length)
    }

    fn derive(&self, article_slug: String, plain_text: &str, max_length: usize) -> NormalizedContent {
        let word_count = markdown::count_words(plain_text);
        let normalized = NormalizedContent {
            slug: article_slug,
            meta_description: content::truncate_at_word_boundary(plain_text, max_length),
            reading_time_minutes: content::reading_time_for_words(word_count, self.words_per_minute),
            word_count,
        };

        debug!(
            "Normalized article: slug={} words={} reading_time={}",
            normalized.slug, normalized.word_count, normalized.reading_time_minutes
        );
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, body: &str) -> NormalizeArticleRequest {
        NormalizeArticleRequest {
            title: title.to_string(),
            content: ArticleContent::from(body),
            format: ContentFormat::Html,
            article_id: None,
            existing_slugs: Vec::new(),
            meta_description_max_length: None,
        }
    }

    #[test]
    fn test_normalize_article() {
        let service = ArticleService::default();
        let body = "word ".repeat(300);

        let normalized = service.normalize_article(&request("Hello World", &body)).unwrap();

        assert_eq!(normalized.slug, "hello-world");
        assert_eq!(normalized.word_count, 300);
        assert_eq!(normalized.reading_time_minutes, 2);
        assert!(normalized.meta_description.ends_with("..."));
        assert!(normalized.meta_description.chars().count() <= 163);
    }

    #[test]
    fn test_normalize_article_avoids_existing_slugs() {
        let service = ArticleService::default();
        let mut req = request("Hello World", "Body");
        req.existing_slugs = vec!["hello-world".to_string()];

        assert_eq!(service.normalize_article(&req).unwrap().slug, "hello-world-1");
    }

    #[test]
    fn test_symbolic_title_uses_identifier_fallback() {
        let service = ArticleService::default();

        let normalized = service.normalize_article(&request("@#$%", "Body")).unwrap();
        assert_eq!(normalized.slug, "");

        let mut req = request("@#$%", "Body");
        req.article_id = Some("9F2A".to_string());
        assert_eq!(service.normalize_article(&req).unwrap().slug, "article-9f2a");
    }

    #[test]
    fn test_custom_description_length() {
        let service = ArticleService::default();
        let mut req = request("T", "alpha beta gamma delta epsilon");
        req.meta_description_max_length = Some(12);

        // 最后一个空格在偏移 10，超过 0.7 * 12
        assert_eq!(service.normalize_article(&req).unwrap().meta_description, "alpha beta...");
    }

    #[test]
    fn test_rejects_oversized_article() {
        let config = Config {
            max_article_length: 10,
            ..Config::default()
        };
        let service = ArticleService::new(&config);

        let err = service
            .normalize_article(&request("T", "this body is longer than ten"))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_rejects_invalid_request_fields() {
        let service = ArticleService::default();
        let mut req = request("T", "Body");
        req.meta_description_max_length = Some(0);

        assert!(matches!(
            service.normalize_article(&req),
            Err(AppError::ValidatorError(_))
        ));
    }

    #[test]
    fn test_normalize_markdown() {
        let service = ArticleService::default();
        let normalized = service.normalize(
            "Rust Tips",
            &ArticleContent::from("# Heading\n\nUse `cargo` often."),
            ContentFormat::Markdown,
        );

        assert_eq!(normalized.slug, "rust-tips");
        assert_eq!(normalized.meta_description, "Heading Use cargo often.");
        assert_eq!(normalized.reading_time_minutes, 1);
    }
}
