//! 通用API客户端
//!
//! 所有请求发往 `{base_url}{endpoint}`，携带固定的JSON请求头和可选的
//! Bearer令牌。每次调用只尝试一次，不重试、不设超时。

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::error::{ApiError, Result};

/// 默认后端地址
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api/v1";

/// API客户端
///
/// 请求头集合在所有共享该客户端的服务之间共享，`set_token`/`remove_token`
/// 会原地修改它。
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    headers: RwLock<HeaderMap>,
}

impl ApiClient {
    /// 创建新的API客户端
    pub fn new(base_url: impl Into<String>, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            headers.insert(AUTHORIZATION, Self::bearer(token)?);
        }

        Ok(Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            headers: RwLock::new(headers),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 更新授权令牌
    pub async fn set_token(&self, token: &str) -> Result<()> {
        let value = Self::bearer(token)?;
        self.headers.write().await.insert(AUTHORIZATION, value);
        info!("Authorization token updated");
        Ok(())
    }

    /// 删除授权令牌
    pub async fn remove_token(&self) {
        self.headers.write().await.remove(AUTHORIZATION);
        info!("Authorization token removed");
    }

    pub async fn has_token(&self) -> bool {
        self.headers.read().await.contains_key(AUTHORIZATION)
    }

    /// GET请求
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request::<T, ()>(Method::GET, endpoint, None).await
    }

    /// POST请求
    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.request(Method::POST, endpoint, Some(body)).await
    }

    /// PUT请求
    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.request(Method::PUT, endpoint, Some(body)).await
    }

    /// PATCH请求
    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.request(Method::PATCH, endpoint, Some(body)).await
    }

    /// DELETE请求
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request::<T, ()>(Method::DELETE, endpoint, None).await
    }

    async fn request<T, B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let result = self.execute(method.clone(), endpoint, body).await;
        if let Err(e) = &result {
            error!("Error en {} {}: {}", method, endpoint, e);
        }
        result
    }

    async fn execute<T, B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("{} Request to: {}", method, url);

        let headers = self.headers.read().await.clone();
        let mut request = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(Self::error_from_response(status, &bytes));
        }

        Self::parse_body(&bytes)
    }

    /// 解析响应体，空响应体按JSON `null` 处理
    fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// 将非2xx响应归一化为错误
    fn error_from_response(status: StatusCode, body: &[u8]) -> ApiError {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|data| data.get("message").and_then(Value::as_str).map(str::to_owned))
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("Error de servidor {}", status.as_u16()));

        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }

    fn bearer(token: &str) -> Result<HeaderValue> {
        HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ApiError::Config(format!("无效的令牌: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_body() {
        let err = ApiClient::error_from_response(
            StatusCode::NOT_FOUND,
            br#"{"message":"Paciente no encontrado"}"#,
        );
        assert_eq!(err.to_string(), "Paciente no encontrado");
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_error_message_fallback() {
        let err = ApiClient::error_from_response(StatusCode::INTERNAL_SERVER_ERROR, b"oops");
        assert_eq!(err.to_string(), "Error de servidor 500");

        let err = ApiClient::error_from_response(StatusCode::BAD_REQUEST, br#"{"error":"x"}"#);
        assert_eq!(err.to_string(), "Error de servidor 400");

        let err = ApiClient::error_from_response(StatusCode::CONFLICT, br#"{"message":""}"#);
        assert_eq!(err.to_string(), "Error de servidor 409");
    }

    #[test]
    fn test_empty_body_is_null() {
        let value: Option<Value> = ApiClient::parse_body(b"").unwrap();
        assert!(value.is_none());
        assert!(ApiClient::parse_body::<serde::de::IgnoredAny>(b"  \n").is_ok());
        assert!(ApiClient::parse_body::<Vec<u32>>(b"").is_err());
    }

    #[tokio::test]
    async fn test_token_lifecycle() {
        let client = ApiClient::new(DEFAULT_BASE_URL, None).unwrap();
        assert!(!client.has_token().await);

        client.set_token("abc").await.unwrap();
        assert!(client.has_token().await);

        client.remove_token().await;
        assert!(!client.has_token().await);

        assert!(client.set_token("bad\ntoken").await.is_err());
    }
}
