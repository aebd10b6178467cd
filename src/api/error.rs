// ==========================================
// 酒店收益管理系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换配置/导出错误为用户友好的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::EngineError;
use crate::engine::revenue_impact::check_range;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("无效输入: {0}")]
    Engine(#[from] EngineError),

    #[error("导出失败: {0}")]
    Export(String),

    #[error("内部错误: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::Export(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Export(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 错误代码（供前端/CLI 展示）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) | ApiError::Engine(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Config(_) => "CONFIG_ERROR",
            ApiError::Export(_) => "EXPORT_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
    }

    /// 转换为结构化错误响应
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            details: None,
        }
    }
}

/// 错误响应（返回给前端）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

// ==========================================
// 输入校验辅助函数
// ==========================================

/// 解析日期字符串
pub fn parse_date(date_str: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|e| ApiError::InvalidInput(format!("日期格式错误（应为YYYY-MM-DD）: {}", e)))
}

/// 校验日期区间 from ≤ to，且长度不超过分析上限
pub fn validate_date_range(from: NaiveDate, to: NaiveDate) -> ApiResult<()> {
    Ok(check_range(from, to)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        match parse_date("03/01/2026") {
            Err(ApiError::InvalidInput(msg)) => assert!(msg.contains("YYYY-MM-DD")),
            _ => panic!("Expected InvalidInput"),
        }
    }

    #[test]
    fn test_validate_date_range() {
        let a = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert!(validate_date_range(a, b).is_ok());
        assert!(validate_date_range(a, a).is_ok());
        assert!(matches!(
            validate_date_range(b, a),
            Err(ApiError::Engine(EngineError::ReversedRange { .. }))
        ));

        let far = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        let err = validate_date_range(NaiveDate::from_ymd_opt(1, 1, 1).unwrap(), far).unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
        assert!(matches!(err, ApiError::Engine(EngineError::RangeTooLong { .. })));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ApiError = ConfigError::Invalid("horizon".to_string()).into();
        assert_eq!(err.code(), "CONFIG_ERROR");
        let response = err.to_response();
        assert!(response.message.contains("horizon"));
    }
}
