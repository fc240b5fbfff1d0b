//! 错误定义模块

use thiserror::Error;

/// 领域层统一错误类型
#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("验证错误: {0}")]
    Validation(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 领域层统一结果类型
pub type Result<T> = std::result::Result<T, ClinicError>;
