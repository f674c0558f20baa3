//! 数据访问门面
//!
//! [`ApiClient`] 是调用方唯一需要的入口：模式在构造时确定，之后所有请求都经过
//! 同一个数据源。`request` 永远返回信封，超时、取消和数据源错误都折叠成
//! `success = false` 的失败响应。

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{ApiConfig, SourceMode};
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::source::{DataSource, SourceRequest, create_source};

mod endpoints;

/// 单次请求的选项
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    // 缺省为 GET
    pub method: Method,
    pub body: Option<Value>,
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post(body: Value) -> Self {
        Self::new(Method::POST).with_body(body)
    }

    pub fn put(body: Value) -> Self {
        Self::new(Method::PUT).with_body(body)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// 令牌被取消时请求立即以 `Cancelled` 结束
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

#[derive(Clone)]
pub struct ApiClient {
    source: Arc<dyn DataSource>,
    config: ApiConfig,
    mode: SourceMode,
}

impl ApiClient {
    /// 解析模式并通过注册表构造数据源
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let source = create_source(config)?;
        Ok(Self::with_source(source, config.clone()))
    }

    /// 使用现成的数据源
    pub fn with_source(source: Arc<dyn DataSource>, config: ApiConfig) -> Self {
        let mode = config.source_mode();
        Self {
            source,
            config,
            mode,
        }
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// 发出请求，任何失败都以失败信封返回
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ApiResponse<Value> {
        let RequestOptions {
            method,
            body,
            cancel,
        } = options;
        debug!("{} {} via {} source", method, endpoint, self.source.name());

        let request = SourceRequest {
            method,
            endpoint: endpoint.to_string(),
            body,
        };

        let result = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(LmsError::cancelled(format!(
                        "Request to {endpoint} was cancelled"
                    ))),
                    result = self.fetch_with_timeout(request) => result,
                }
            }
            None => self.fetch_with_timeout(request).await,
        };

        match result {
            Ok(envelope) => {
                if !envelope.success {
                    warn!(
                        "{} returned failure: {}",
                        endpoint,
                        envelope.error.as_deref().unwrap_or("unknown error")
                    );
                }
                envelope
            }
            Err(e) => {
                warn!("{} failed with {}: {}", endpoint, e.code(), e.message());
                ApiResponse::failure(&e)
            }
        }
    }

    async fn fetch_with_timeout(&self, request: SourceRequest) -> Result<ApiResponse<Value>> {
        let Some(limit) = self.config.timeout() else {
            return self.source.fetch(request).await;
        };
        let endpoint = request.endpoint.clone();
        tokio::time::timeout(limit, self.source.fetch(request))
            .await
            .map_err(|_| {
                LmsError::timeout(format!(
                    "Request to {endpoint} timed out after {} ms",
                    limit.as_millis()
                ))
            })?
    }

    /// 请求并把载荷解析为 `T`
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ApiResponse<T> {
        self.request(endpoint, options).await.decode()
    }

    /// 带 JSON 请求体的调用，请求体无法序列化时直接返回失败信封
    pub async fn send<B, T>(&self, method: Method, endpoint: &str, body: &B) -> ApiResponse<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match serde_json::to_value(body) {
            Ok(value) => {
                self.call(endpoint, RequestOptions::new(method).with_body(value))
                    .await
            }
            Err(e) => ApiResponse::failure(&LmsError::from(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::entities::Course;
    use std::time::Duration;

    fn fixture_client() -> ApiClient {
        ApiClient::new(&ApiConfig::fixture(0)).unwrap()
    }

    // 返回固定载荷的数据源
    struct StaticSource(Value);

    #[async_trait::async_trait]
    impl DataSource for StaticSource {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn fetch(&self, _: SourceRequest) -> Result<ApiResponse<Value>> {
            Ok(ApiResponse::success(self.0.clone(), "ok"))
        }
    }

    #[tokio::test]
    async fn test_fixture_mode_lists_seeded_courses() {
        let client = fixture_client();
        assert_eq!(client.mode(), SourceMode::Fixture);

        let response = client.request("/courses", RequestOptions::get()).await;
        assert!(response.success);
        let courses: Vec<Course> = serde_json::from_value(response.data.unwrap()).unwrap();
        assert_eq!(courses.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_activity_envelope() {
        let client = fixture_client();
        let response = client
            .request(
                "/courses/course-1/activities/activity-404",
                RequestOptions::get(),
            )
            .await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Activity not found"));
        assert_eq!(
            response.message.as_deref(),
            Some("The requested activity could not be found")
        );
    }

    #[tokio::test]
    async fn test_unmatched_and_malformed_requests_return_failure_envelopes() {
        let client = fixture_client();

        let unmatched = client.request("/nowhere", RequestOptions::get()).await;
        assert!(!unmatched.success);
        assert_eq!(unmatched.code.as_deref(), Some("E003"));
        assert_eq!(
            unmatched.message.as_deref(),
            Some("The requested endpoint is not available in mock mode")
        );

        let malformed = client
            .request("/courses", RequestOptions::post(Value::String("nope".into())))
            .await;
        assert!(!malformed.success);
        assert_eq!(malformed.code.as_deref(), Some("E008"));

        let missing_body = client
            .request("/assignments/submit", RequestOptions::new(Method::POST))
            .await;
        assert!(!missing_body.success);
    }

    #[tokio::test]
    async fn test_simulated_latency_is_applied() {
        let client = ApiClient::new(&ApiConfig::fixture(100)).unwrap();
        let started = std::time::Instant::now();
        let response = client.request("/users", RequestOptions::get()).await;
        assert!(response.success);
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_timeout_becomes_failure_envelope() {
        let config = ApiConfig {
            timeout_ms: 20,
            ..ApiConfig::fixture(500)
        };
        let client = ApiClient::new(&config).unwrap();
        let response = client.request("/courses", RequestOptions::get()).await;
        assert!(!response.success);
        assert_eq!(response.code.as_deref(), Some("E005"));
    }

    #[tokio::test]
    async fn test_cancellation_becomes_failure_envelope() {
        let client = ApiClient::new(&ApiConfig::fixture(10_000)).unwrap();
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let started = std::time::Instant::now();
        let response = client
            .request("/courses", RequestOptions::get().with_cancel(token))
            .await;
        assert!(!response.success);
        assert_eq!(response.code.as_deref(), Some("E006"));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_typed_decode_mismatch_is_malformed() {
        let client = ApiClient::with_source(
            Arc::new(StaticSource(serde_json::json!({"unexpected": true}))),
            ApiConfig::fixture(0),
        );
        let response: ApiResponse<Vec<Course>> = client.call("/courses", RequestOptions::get()).await;
        assert!(!response.success);
        assert_eq!(response.code.as_deref(), Some("E004"));
    }

    #[tokio::test]
    async fn test_remote_mode_is_resolved_once() {
        let client = ApiClient::new(&ApiConfig::remote("http://127.0.0.1:9/api")).unwrap();
        assert_eq!(client.mode(), SourceMode::Remote);
        assert_eq!(client.source_name(), "http");
    }
}
