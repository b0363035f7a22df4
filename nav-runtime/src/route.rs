//! # Route 模块
//!
//! 路由标识：一个规范化后的页面路径字符串。
//!
//! ## 规范化规则
//!
//! - 去掉查询串（`?…`）与片段（`#…`）
//! - 去掉末尾 `/`（根路由 `/` 除外）
//! - 空字符串视为 `/`
//! - 缺少前导 `/` 时补齐
//!
//! 两个路由相等当且仅当规范化后的字符串相等。

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// 页面路由
///
/// 构造时即完成规范化，之后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Route(String);

impl Route {
    /// 根路由
    pub const ROOT: &'static str = "/";

    /// 从任意路径字符串创建（自动规范化）
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(canonicalize(path.as_ref()))
    }

    /// 根路由 `/`
    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    /// 规范化后的路径
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 是否是根路由
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    /// 是否位于某个前缀之下（按路径段匹配）
    ///
    /// `/admin/analytics` 位于 `/admin` 之下；`/administrator` 不是。
    pub fn is_under(&self, prefix: &Route) -> bool {
        if prefix.is_root() {
            return true;
        }
        match self.0.strip_prefix(prefix.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with('/'),
            None => false,
        }
    }
}

fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let end = trimmed.find(['?', '#']).unwrap_or(trimmed.len());
    let path = trimmed[..end].trim_end_matches('/');

    if path.is_empty() {
        return Route::ROOT.to_string();
    }
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Route {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Route {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.0
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Route {
    fn borrow(&self) -> &str {
        &self.0
    }
}
