//! 端点字符串解析
//!
//! 端点形如 `/forum-posts?forumId=activity-3`，路由匹配只看路径部分，
//! 查询参数单独解码后交给处理函数。

use std::collections::HashMap;

use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointParts {
    pub path: String,
    pub query: HashMap<String, String>,
}

/// 拆分路径与查询串，并规范化路径（补前导 `/`，去掉末尾 `/`）
pub fn split_endpoint(endpoint: &str) -> EndpointParts {
    let (raw_path, raw_query) = match endpoint.split_once('?') {
        Some((path, query)) => (path, query),
        None => (endpoint, ""),
    };

    let trimmed = raw_path.trim().trim_end_matches('/');
    let path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    // 重复的键以最后一次出现为准
    let query = form_urlencoded::parse(raw_query.as_bytes())
        .into_owned()
        .collect();

    EndpointParts { path, query }
}

/// 查询参数值编码
pub fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_endpoint_with_query() {
        let parts = split_endpoint("/generative-tasks/task-1/hints?difficulty=hard");
        assert_eq!(parts.path, "/generative-tasks/task-1/hints");
        assert_eq!(parts.query.get("difficulty").map(String::as_str), Some("hard"));
    }

    #[test]
    fn test_split_endpoint_normalizes_slashes() {
        assert_eq!(split_endpoint("courses/").path, "/courses");
        assert_eq!(split_endpoint("/").path, "/");
        assert!(split_endpoint("/courses").query.is_empty());
    }

    #[test]
    fn test_query_values_are_decoded() {
        let parts = split_endpoint("/forum-posts?forumId=a%20b&x=1");
        assert_eq!(parts.query.get("forumId").map(String::as_str), Some("a b"));
        assert_eq!(encode_query_value("a b&c"), "a+b%26c");
    }
}
