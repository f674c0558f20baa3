use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::LmsError;

// 统一的API响应结构
//
// 成功：`success = true`，`data` 为载荷，`message` 为可读说明。
// 失败：`success = false`，`error` 为错误详情，`code` 为错误代码（远程服务可能不提供）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
            code: None,
        }
    }

    /// 由错误构造失败响应
    pub fn failure(err: &LmsError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.message().to_string()),
            message: Some(err.describe()),
            code: Some(err.code().to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// 失败响应还原为错误；成功但缺少 `data` 的响应返回 `Ok(None)`
    pub fn into_result(self) -> Result<Option<T>, LmsError> {
        if self.success {
            return Ok(self.data);
        }
        let detail = self
            .error
            .or(self.message)
            .unwrap_or_else(|| "Unknown error occurred".to_string());
        Err(match self.code.as_deref() {
            Some("E001") => LmsError::network(detail),
            Some("E003") => LmsError::route_not_found(detail),
            Some("E004") => LmsError::malformed_response(detail),
            Some("E005") => LmsError::timeout(detail),
            Some("E006") => LmsError::cancelled(detail),
            Some("E007") => LmsError::not_found(detail),
            Some("E008") => LmsError::validation(detail),
            Some("E009") => LmsError::serialization(detail),
            Some("E010") => LmsError::config(detail),
            Some("E011") => LmsError::source_plugin_not_found(detail),
            Some("E012") => LmsError::session(detail),
            _ => LmsError::http(detail),
        })
    }
}

impl ApiResponse<serde_json::Value> {
    /// 把 JSON 载荷解析为具体类型；解析失败视为格式错误的响应
    pub fn decode<T: DeserializeOwned>(self) -> ApiResponse<T> {
        if !self.success {
            return ApiResponse {
                success: false,
                data: None,
                error: self.error,
                message: self.message,
                code: self.code,
            };
        }
        match self.data {
            None => ApiResponse {
                success: true,
                data: None,
                error: None,
                message: self.message,
                code: None,
            },
            Some(value) => match serde_json::from_value::<T>(value) {
                Ok(data) => ApiResponse {
                    success: true,
                    data: Some(data),
                    error: None,
                    message: self.message,
                    code: None,
                },
                Err(e) => ApiResponse::failure(&LmsError::malformed_response(format!(
                    "Unexpected payload shape: {e}"
                ))),
            },
        }
    }
}
