//! 内存 fixture 数据源
//!
//! 持有种子数据的一份可变副本，按路由表把请求分派给处理函数。
//! 每个请求之前都会等待配置的模拟延迟；写操作只改内存副本，进程结束即丢弃。

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::source::{DataSource, SourceRequest};
use crate::utils::split_endpoint;

mod handlers;
pub mod router;
pub mod seed;

pub use router::{Route, RouteContext, RouteTable};
pub use seed::FixtureData;

/// 可变的内存数据
#[derive(Debug, Default)]
pub struct FixtureStore {
    data: RwLock<FixtureData>,
}

impl FixtureStore {
    pub fn new(data: FixtureData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    // 处理函数不会在持锁期间 panic，中毒时沿用内部数据
    pub fn read(&self) -> RwLockReadGuard<'_, FixtureData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, FixtureData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前数据的快照
    pub fn snapshot(&self) -> FixtureData {
        self.read().clone()
    }
}

pub struct FixtureSource {
    store: FixtureStore,
    routes: RouteTable,
    delay: Duration,
}

impl FixtureSource {
    pub const PLUGIN_NAME: &'static str = "fixture";

    /// 使用内嵌种子数据
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self::with_data(FixtureData::seed()?, config.mock_delay()))
    }

    pub fn with_data(data: FixtureData, delay: Duration) -> Self {
        Self {
            store: FixtureStore::new(data),
            routes: handlers::route_table(),
            delay,
        }
    }

    pub fn store(&self) -> &FixtureStore {
        &self.store
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 不经过延迟，直接分派
    pub fn dispatch(&self, request: &SourceRequest) -> Result<ApiResponse<Value>> {
        let parts = split_endpoint(&request.endpoint);

        let matched = self
            .routes
            .resolve(&request.method, &parts.path)
            .ok_or_else(|| {
                LmsError::route_not_found(format!(
                    "Endpoint not found in mock data: {} {}",
                    request.method, parts.path
                ))
            })?;

        debug!(
            "Fixture route {} {} matched {}",
            request.method,
            parts.path,
            matched.route.pattern()
        );

        let context = RouteContext {
            params: matched.params.clone(),
            query: parts.query,
            body: request.body.clone(),
        };
        (matched.handler())(&self.store, &context)
    }
}

#[async_trait::async_trait]
impl DataSource for FixtureSource {
    fn name(&self) -> &'static str {
        Self::PLUGIN_NAME
    }

    async fn fetch(&self, request: SourceRequest) -> Result<ApiResponse<Value>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let result = self.dispatch(&request);
        if let Err(e) = &result {
            warn!(
                "Fixture request {} {} failed: {}",
                request.method, request.endpoint, e
            );
        }
        result
    }
}

/// 把载荷序列化成成功信封
pub(crate) fn respond<T: Serialize>(data: T, message: &str) -> Result<ApiResponse<Value>> {
    Ok(ApiResponse::success(serde_json::to_value(data)?, message))
}
