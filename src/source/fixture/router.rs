//! fixture 路由表
//!
//! 每条路由由方法和路径模板组成，模板中的 `{name}` 段匹配任意非空段。
//! 匹配顺序按特异性排列：段数多的优先，段数相同时字面段多的优先，
//! 因此 `/assignments/submit` 总是先于 `/assignments/{id}` 被尝试。

use std::cmp::Reverse;
use std::collections::HashMap;

use regex::Regex;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::FixtureStore;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;

pub type Handler = fn(&FixtureStore, &RouteContext) -> Result<ApiResponse<Value>>;

/// 处理函数看到的请求上下文
#[derive(Debug, Clone, Default)]
pub struct RouteContext {
    pub params: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
}

impl RouteContext {
    /// 路径参数，路由模板保证其存在
    pub fn param(&self, name: &str) -> Result<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| LmsError::validation(format!("Missing path parameter: {name}")))
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// 把请求体解析为具体类型
    pub fn body<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self
            .body
            .clone()
            .ok_or_else(|| LmsError::validation("Request body is required"))?;
        serde_json::from_value(body)
            .map_err(|e| LmsError::validation(format!("Invalid request body: {e}")))
    }
}

pub struct Route {
    method: Method,
    pattern: &'static str,
    regex: Regex,
    param_names: Vec<String>,
    segments: usize,
    literal_segments: usize,
    handler: Handler,
}

impl Route {
    pub fn new(method: Method, pattern: &'static str, handler: Handler) -> Self {
        let mut param_names = Vec::new();
        let mut literal_segments = 0;
        let mut expr = String::from("^");

        let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
        for part in &parts {
            expr.push('/');
            match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) => {
                    expr.push_str(&format!("(?P<{name}>[^/]+)"));
                    param_names.push(name.to_string());
                }
                None => {
                    expr.push_str(&regex::escape(part));
                    literal_segments += 1;
                }
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr).expect("Invalid fixture route pattern");

        Self {
            method,
            pattern,
            regex,
            param_names,
            segments: parts.len(),
            literal_segments,
            handler,
        }
    }

    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.regex.captures(path)?;
        Some(
            self.param_names
                .iter()
                .filter_map(|name| {
                    caps.name(name)
                        .map(|m| (name.clone(), m.as_str().to_string()))
                })
                .collect(),
        )
    }
}

/// 解析结果：命中的处理函数和路径参数
pub struct Matched<'a> {
    pub route: &'a Route,
    pub params: HashMap<String, String>,
}

impl Matched<'_> {
    pub fn handler(&self) -> Handler {
        self.route.handler
    }
}

pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(mut routes: Vec<Route>) -> Self {
        // 稳定排序，特异性相同的路由保持注册顺序
        routes.sort_by_key(|r| (Reverse(r.segments), Reverse(r.literal_segments)));
        Self { routes }
    }

    /// 第一个方法和路径都匹配的路由
    pub fn resolve(&self, method: &Method, path: &str) -> Option<Matched<'_>> {
        self.routes
            .iter()
            .filter(|r| &r.method == method)
            .find_map(|route| {
                route
                    .captures(path)
                    .map(|params| Matched { route, params })
            })
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}
