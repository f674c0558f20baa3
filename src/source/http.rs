//! 远程 HTTP 数据源
//!
//! 把请求原样转发到 `base_url + endpoint`，并把响应整理成统一信封。
//! 远程返回的 JSON 如果没有 `success` 字段，会被包装成成功信封而不是报错。

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::ApiConfig;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::source::{DataSource, SourceRequest};

pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub const PLUGIN_NAME: &'static str = "http";

    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config
            .base_url()
            .ok_or_else(|| LmsError::config("Remote data source requires api.base_url"))?
            .to_string();
        url::Url::parse(&base_url)
            .map_err(|e| LmsError::config(format!("Invalid api.base_url '{base_url}': {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LmsError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }
}

#[async_trait::async_trait]
impl DataSource for HttpSource {
    fn name(&self) -> &'static str {
        Self::PLUGIN_NAME
    }

    async fn fetch(&self, request: SourceRequest) -> Result<ApiResponse<Value>> {
        let url = self.url_for(&request.endpoint);
        debug!("Forwarding {} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            LmsError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("Failed to read response body from {}: {}", url, e);
            LmsError::network(e.to_string())
        })?;

        if !status.is_success() {
            return Err(match upstream_message(&text) {
                Some(detail) => LmsError::http_status(status.as_u16(), detail),
                None => LmsError::http(format!("HTTP error! status: {}", status.as_u16())),
            });
        }

        // 204 等空响应视为没有载荷的成功
        if text.trim().is_empty() {
            return Ok(ApiResponse {
                success: true,
                data: None,
                error: None,
                message: None,
                code: None,
            });
        }

        let value: Value = serde_json::from_str(&text).map_err(|e| {
            LmsError::malformed_response(format!("Response from {url} is not JSON: {e}"))
        })?;
        Ok(into_envelope(value))
    }
}

/// 错误响应里的 `message` 或 `error` 字段
fn upstream_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}

/// 信封中的文本字段，非字符串值按 JSON 文本保留
fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// 带布尔 `success` 的按信封解析，其余整体作为 `data` 包装
fn into_envelope(mut value: Value) -> ApiResponse<Value> {
    let Some(success) = value.get("success").and_then(Value::as_bool) else {
        warn!("Remote response has no envelope, wrapping it as data");
        return ApiResponse {
            success: true,
            data: Some(value),
            error: None,
            message: None,
            code: None,
        };
    };

    let data = value
        .get_mut("data")
        .map(Value::take)
        .filter(|data| !data.is_null());
    let message = text_field(&value, "message");
    let mut error = text_field(&value, "error");
    if !success && error.is_none() && message.is_none() {
        error = Some("Unknown error occurred".to_string());
    }

    ApiResponse {
        success,
        data,
        error,
        message,
        code: text_field(&value, "code"),
    }
}
