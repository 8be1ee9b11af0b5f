use crate::error::{AppError, Result};
use crate::utils::validation::validate_identifier;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use tracing::debug;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 每个请求显式携带的上下文，控制器不读取任何全局状态
///
/// 用户身份由上游网关认证后写入 `X-User-Id`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: Option<String>,
    pub request_id: String,
}

impl RequestContext {
    /// 需要登录的操作使用
    pub fn require_user(&self) -> Result<&str> {
        self.user_id
            .as_deref()
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }

    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        let user_id = match headers.get(USER_ID_HEADER) {
            Some(value) => {
                let user_id = value
                    .to_str()
                    .map_err(|_| AppError::bad_request("Invalid X-User-Id header"))?
                    .trim();
                validate_identifier("user_id", user_id)?;
                Some(user_id.to_string())
            }
            None => None,
        };

        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self { user_id, request_id })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> std::result::Result<Self, Self::Rejection> {
        let context = Self::from_headers(&parts.headers)?;
        debug!(
            request_id = %context.request_id,
            user_id = ?context.user_id,
            "{} {}",
            parts.method,
            parts.uri.path()
        );
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_context_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("user-1"));
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-42"));

        let context = RequestContext::from_headers(&headers).unwrap();
        assert_eq!(context.user_id.as_deref(), Some("user-1"));
        assert_eq!(context.request_id, "req-42");
        assert_eq!(context.require_user().unwrap(), "user-1");
    }

    #[test]
    fn test_anonymous_context() {
        let context = RequestContext::from_headers(&HeaderMap::new()).unwrap();
        assert!(context.user_id.is_none());
        assert!(!context.request_id.is_empty());
        assert!(matches!(context.require_user(), Err(AppError::Authentication(_))));
    }

    #[test]
    fn test_blank_user_header_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("   "));
        assert!(RequestContext::from_headers(&headers).is_err());
    }
}
