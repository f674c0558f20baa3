use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 应用配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub session: SessionConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            system_name: "SkillSpace".to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// 数据访问配置
///
/// 三个开关互相独立，由 [`ApiConfig::source_mode`] 决定最终使用哪个数据源。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: Option<String>, // 远程服务地址，空字符串视为未配置
    pub use_mock: Option<bool>,   // 显式 mock 开关
    pub mock_delay_ms: u64,       // 模拟网络延迟 (毫秒)
    pub timeout_ms: u64,          // 单个请求超时 (毫秒)，0 表示不限制
}

pub const DEFAULT_MOCK_DELAY_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            use_mock: None,
            mock_delay_ms: DEFAULT_MOCK_DELAY_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// 数据源模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    Fixture, // 内存 fixture，模拟延迟
    Remote,  // 转发到外部 HTTP 服务
}

impl SourceMode {
    /// 数据源插件注册名
    pub fn plugin_name(&self) -> &'static str {
        match self {
            SourceMode::Fixture => "fixture",
            SourceMode::Remote => "http",
        }
    }
}

impl std::fmt::Display for SourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceMode::Fixture => write!(f, "fixture"),
            SourceMode::Remote => write!(f, "remote"),
        }
    }
}

impl ApiConfig {
    /// 仅使用 fixture 的配置
    pub fn fixture(mock_delay_ms: u64) -> Self {
        Self {
            use_mock: Some(true),
            mock_delay_ms,
            ..Default::default()
        }
    }

    /// 指向远程服务的配置
    pub fn remote(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// 有效的远程地址（去掉空白与结尾的 `/`）
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }

    /// 解析数据源模式：显式 mock 开关优先；否则有远程地址则走远程；都没有则走 fixture
    pub fn source_mode(&self) -> SourceMode {
        match (self.use_mock, self.base_url()) {
            (Some(true), _) => SourceMode::Fixture,
            (_, Some(_)) => SourceMode::Remote,
            (Some(false), None) => {
                tracing::warn!("Mock mode disabled but no base URL configured, using fixture");
                SourceMode::Fixture
            }
            (None, None) => SourceMode::Fixture,
        }
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
    pub workers: usize,
    pub max_workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            api_prefix: "/api".to_string(),
            workers: 0,
            max_workers: 8,
        }
    }
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { max_age: 3600 }
    }
}

/// 会话存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub path: String, // 会话文件路径
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: "session.json".to_string(),
        }
    }
}
