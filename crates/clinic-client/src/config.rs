//! 客户端配置
//!
//! 配置来源按优先级从低到高：默认值、配置文件、`CLINIC_` 前缀的环境变量。

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::DEFAULT_BASE_URL;
use crate::error::{ApiError, Result};

/// 客户端配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 后端API根地址
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer令牌
    #[serde(default)]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

impl ClientConfig {
    /// 加载配置，`path` 为可选的配置文件（按扩展名识别格式）
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!("Loading client configuration from {}", path);
            builder = builder.add_source(File::with_name(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix("CLINIC"))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("无效的base_url '{}': {}", self.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "base_url 必须使用 http 或 https: {}",
                self.base_url
            )));
        }

        if let Some(token) = &self.token {
            if token.trim().is_empty() {
                return Err(ApiError::Config("token 不能为空".to_string()));
            }
        }

        Ok(())
    }

    /// 去掉末尾斜杠的根地址，便于直接拼接端点路径
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
