//! 客户端错误定义

use clinic_core::ClinicError;
use thiserror::Error;

/// API调用错误
#[derive(Error, Debug)]
pub enum ApiError {
    /// 后端返回非2xx状态码，消息取自响应体的 `message` 字段
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("网络错误: {0}")]
    Network(#[from] reqwest::Error),

    #[error("响应解析错误: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("配置错误: {0}")]
    Config(String),

    #[error(transparent)]
    Domain(#[from] ClinicError),
}

impl ApiError {
    /// HTTP状态码（仅后端错误携带）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}

/// 客户端统一结果类型
pub type Result<T> = std::result::Result<T, ApiError>;
