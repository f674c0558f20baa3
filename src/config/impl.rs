use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 环境变量 -> 配置键 的覆盖表
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("APP_ENV", "app.environment"),
    ("RUST_LOG", "app.log_level"),
    ("LMS_API_URL", "api.base_url"),
    ("LMS_USE_MOCK_DATA", "api.use_mock"),
    ("LMS_MOCK_DELAY", "api.mock_delay_ms"),
    ("LMS_REQUEST_TIMEOUT", "api.timeout_ms"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("CPU_COUNT", "server.workers"),
    ("SESSION_PATH", "session.path"),
];

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let overrides = ENV_OVERRIDES
            .iter()
            .map(|(var, key)| (*key, std::env::var(var).ok()));
        Self::load_with(overrides)
    }

    /// 按给定覆盖项加载配置（覆盖项优先级最高）
    pub fn load_with<'a, I>(overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, Option<String>)>,
    {
        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("SKILLSPACE")
                    .separator("__")
                    .try_parsing(true),
            );

        for (key, value) in overrides {
            // 空字符串等同于未设置
            let value = value.filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
