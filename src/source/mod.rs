//! 数据源
//!
//! 门面层只依赖 [`DataSource`]，具体实现（本地 fixture 或远程 HTTP）在启动时
//! 按配置解析出的模式从注册表中构造，之后不再切换。

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;

pub mod fixture;
pub mod http;
pub mod register;

pub use fixture::FixtureSource;
pub use http::HttpSource;

/// 发往数据源的一次请求
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRequest {
    pub method: Method,
    // 相对于 base URL 的端点，可带查询串
    pub endpoint: String,
    pub body: Option<Value>,
}

impl SourceRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// 插件名称，与注册表中的键一致
    fn name(&self) -> &'static str;

    /// 返回成功或失败信封；`Err` 表示请求没有得到可用的信封
    async fn fetch(&self, request: SourceRequest) -> Result<ApiResponse<Value>>;
}

/// 按配置解析出的模式创建数据源
pub fn create_source(config: &ApiConfig) -> Result<Arc<dyn DataSource>> {
    let mode = config.source_mode();
    let name = mode.plugin_name();

    let constructor = register::get_source_plugin(name).ok_or_else(|| {
        LmsError::source_plugin_not_found(format!("Data source '{name}' is not registered"))
    })?;

    let source = constructor(config)?;
    tracing::debug!("Data source '{}' created for {} mode", source.name(), mode);
    Ok(Arc::from(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_source_follows_mode() {
        let fixture = create_source(&ApiConfig::fixture(0)).unwrap();
        assert_eq!(fixture.name(), "fixture");

        let remote = create_source(&ApiConfig::remote("http://127.0.0.1:9/api")).unwrap();
        assert_eq!(remote.name(), "http");
    }
}
