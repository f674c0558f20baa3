//! 数据源转发
//!
//! 前缀下的任意方法和路径都交给 [`ApiClient::request`]，原样返回响应信封，
//! 并按错误代码选择 HTTP 状态码。

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::client::{ApiClient, RequestOptions};
use crate::errors::LmsError;
use crate::models::ApiResponse;

/// 失败信封对应的状态码
pub fn status_for<T>(envelope: &ApiResponse<T>) -> StatusCode {
    if envelope.success {
        return StatusCode::OK;
    }
    match envelope.code.as_deref() {
        Some("E003" | "E007") => StatusCode::NOT_FOUND,
        Some("E008" | "E009") => StatusCode::BAD_REQUEST,
        Some("E005") => StatusCode::GATEWAY_TIMEOUT,
        Some("E001" | "E002" | "E004") => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reply<T: serde::Serialize>(envelope: &ApiResponse<T>) -> HttpResponse {
    HttpResponse::build(status_for(envelope)).json(envelope)
}

fn reject(err: LmsError) -> HttpResponse {
    reply(&ApiResponse::<()>::failure(&err))
}

pub async fn proxy(
    req: HttpRequest,
    tail: web::Path<String>,
    body: web::Bytes,
    client: web::Data<ApiClient>,
) -> ActixResult<HttpResponse> {
    let method = match Method::from_bytes(req.method().as_str().as_bytes()) {
        Ok(method) => method,
        Err(_) => {
            return Ok(reject(LmsError::validation(format!(
                "Unsupported method: {}",
                req.method()
            ))));
        }
    };

    let mut endpoint = format!("/{}", tail.trim_start_matches('/'));
    if !req.query_string().is_empty() {
        endpoint.push('?');
        endpoint.push_str(req.query_string());
    }

    let mut options = RequestOptions::new(method);
    if !body.is_empty() {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => options = options.with_body(value),
            Err(e) => {
                return Ok(reject(LmsError::validation(format!(
                    "Invalid request body: {e}"
                ))));
            }
        }
    }

    debug!("Forwarding {} {}", req.method(), endpoint);
    let envelope = client.request(&endpoint, options).await;
    Ok(reply(&envelope))
}
