use crate::client::ApiClient;
use crate::config::{ApiConfig, AppConfig, SourceMode};
use crate::errors::Result;
use crate::session::SessionStore;
use tracing::{debug, warn};

pub struct StartupContext {
    pub client: ApiClient,
    pub session: SessionStore,
}

/// 创建数据访问客户端
fn create_client(config: &ApiConfig) -> Result<ApiClient> {
    let mode = config.source_mode();
    warn!("Attempting to create {} data source", mode);

    match ApiClient::new(config) {
        Ok(client) => {
            warn!("Successfully created {} data source", client.source_name());
            Ok(client)
        }
        Err(e) if mode == SourceMode::Remote => {
            // 远程配置无效时回退到 fixture
            warn!("Failed to create remote data source: {}", e);
            warn!("Falling back to fixture data source");
            ApiClient::new(&ApiConfig {
                use_mock: Some(true),
                ..config.clone()
            })
        }
        Err(e) => Err(e),
    }
}

/// 读取会话文件，失败时使用内存会话
fn load_session(config: &AppConfig) -> SessionStore {
    match SessionStore::from_config(&config.session) {
        Ok(session) => {
            debug!("Session loaded from {}", config.session.path);
            session
        }
        Err(e) => {
            warn!("Failed to load session: {}, using in-memory session", e);
            SessionStore::in_memory()
        }
    }
}

/// 准备启动上下文
/// 包括数据源和会话
pub fn prepare_startup(config: &AppConfig) -> Result<StartupContext> {
    if cfg!(debug_assertions) {
        crate::source::register::debug_source_registry();
        debug!("Debug mode: Source registry is enabled");
    }

    let client = create_client(&config.api)?;
    let session = load_session(config);

    Ok(StartupContext { client, session })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_remote_falls_back_to_fixture() {
        let config = AppConfig {
            api: ApiConfig::remote("not a url"),
            ..Default::default()
        };
        let context = prepare_startup(&config).unwrap();
        assert_eq!(context.client.source_name(), "fixture");
    }

    #[test]
    fn test_session_is_loaded_from_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig {
            api: ApiConfig::fixture(0),
            ..Default::default()
        };
        config.session.path = dir.path().join("session.json").display().to_string();

        let context = prepare_startup(&config).unwrap();
        assert_eq!(context.client.mode(), SourceMode::Fixture);
        assert_eq!(context.session.path(), Some(dir.path().join("session.json").as_path()));
    }
}
