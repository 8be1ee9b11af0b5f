use crate::error::{AppError, Result};

/// 标识符的最大长度
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// 鼓掌增量必须是正整数
pub fn validate_clap_delta(delta: i32) -> Result<()> {
    if delta < 1 {
        return Err(AppError::Validation(format!(
            "Clap count must be a positive integer, got {}",
            delta
        )));
    }

    Ok(())
}

/// 验证用户、文章等标识符
pub fn validate_identifier(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }

    if value.len() > MAX_IDENTIFIER_LENGTH {
        return Err(AppError::Validation(format!(
            "{} must not exceed {} characters",
            field, MAX_IDENTIFIER_LENGTH
        )));
    }

    if value.chars().any(|c| c.is_control()) {
        return Err(AppError::Validation(format!(
            "{} contains control characters",
            field
        )));
    }

    Ok(())
}
