//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 门面层（`client`）会把所有错误折叠进 `ApiResponse` 的失败分支，调用方不会看到 panic 或 `Err`。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_lms_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum LmsError {
            $($variant(String),)*
        }

        impl LmsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LmsError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl LmsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LmsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_lms_errors! {
    Network("E001", "Network Error"),
    Http("E002", "HTTP Error"),
    RouteNotFound("E003", "Route Not Found"),
    MalformedResponse("E004", "Malformed Response"),
    Timeout("E005", "Timeout"),
    Cancelled("E006", "Request Cancelled"),
    NotFound("E007", "Resource Not Found"),
    Validation("E008", "Validation Error"),
    Serialization("E009", "Serialization Error"),
    Config("E010", "Configuration Error"),
    SourcePluginNotFound("E011", "Data Source Plugin Not Found"),
    Session("E012", "Session Store Error"),
}

impl LmsError {
    /// 非 2xx 响应，错误详情中带上状态码
    pub fn http_status(status: u16, msg: impl fmt::Display) -> Self {
        LmsError::Http(format!("{msg} (status {status})"))
    }

    /// 面向用户的错误描述，填入响应信封的 `message` 字段
    pub fn describe(&self) -> String {
        match self {
            LmsError::Network(_) => "Network error".to_string(),
            LmsError::Http(_) => "The server rejected the request".to_string(),
            LmsError::RouteNotFound(_) => {
                "The requested endpoint is not available in mock mode".to_string()
            }
            LmsError::MalformedResponse(_) => {
                "The server response could not be understood".to_string()
            }
            LmsError::Timeout(_) => "The request timed out".to_string(),
            LmsError::Cancelled(_) => "The request was cancelled".to_string(),
            LmsError::NotFound(msg) => {
                // "Activity not found" -> "The requested activity could not be found"
                match msg.strip_suffix(" not found") {
                    Some(entity) => format!(
                        "The requested {} could not be found",
                        entity.to_lowercase()
                    ),
                    None => "The requested resource could not be found".to_string(),
                }
            }
            _ => self.format_simple(),
        }
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LmsError {}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for LmsError {
    fn from(err: std::io::Error) -> Self {
        LmsError::Session(err.to_string())
    }
}

impl From<serde_json::Error> for LmsError {
    fn from(err: serde_json::Error) -> Self {
        LmsError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for LmsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LmsError::Timeout(err.to_string())
        } else if err.is_decode() {
            LmsError::MalformedResponse(err.to_string())
        } else {
            LmsError::Network(err.to_string())
        }
    }
}

impl From<config::ConfigError> for LmsError {
    fn from(err: config::ConfigError) -> Self {
        LmsError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LmsError::network("test").code(), "E001");
        assert_eq!(LmsError::route_not_found("test").code(), "E003");
        assert_eq!(LmsError::timeout("test").code(), "E005");
        assert_eq!(LmsError::session("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            LmsError::malformed_response("test").error_type(),
            "Malformed Response"
        );
        assert_eq!(
            LmsError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_http_status_message() {
        let err = LmsError::http_status(503, "Service Unavailable");
        assert_eq!(err.code(), "E002");
        assert_eq!(err.message(), "Service Unavailable (status 503)");
    }

    #[test]
    fn test_describe_not_found() {
        let err = LmsError::not_found("Activity not found");
        assert_eq!(err.describe(), "The requested activity could not be found");
        assert_eq!(err.message(), "Activity not found");
    }

    #[test]
    fn test_format_simple() {
        let err = LmsError::validation("Invalid body");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid body"));
    }
}
