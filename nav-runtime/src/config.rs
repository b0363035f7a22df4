//! # Route Config 模块
//!
//! 两张静态查找表：路由 → 默认过渡效果，路由 → 父子关系。
//!
//! 启动时加载一次，之后不可变（通过 `Arc` 共享）。
//! 行为全部由表驱动，不在控制流里硬编码路由。
//!
//! ## 文件格式
//!
//! ```json
//! {
//!   "transitions": { "/": "fade", "/admin": "slide-left" },
//!   "relationships": {
//!     "/": { "parent": null, "children": ["/admin"] },
//!     "/admin": { "parent": "/" }
//!   }
//! }
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, NavResult};
use crate::relationship::{RelationshipTable, RouteRelationship};
use crate::route::Route;
use crate::transition::TransitionKind;

/// 路由 → 默认过渡效果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitionTable {
    entries: HashMap<Route, TransitionKind>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入（或覆盖）一个路由的默认效果
    pub fn insert(&mut self, route: impl Into<Route>, kind: TransitionKind) {
        self.entries.insert(route.into(), kind);
    }

    /// 查询显式配置的效果
    pub fn get(&self, route: &Route) -> Option<TransitionKind> {
        self.entries.get(route).copied()
    }

    /// 是否显式配置了该路由
    pub fn contains(&self, route: &Route) -> bool {
        self.entries.contains_key(route)
    }

    /// 遍历所有条目（按路由排序）
    pub fn iter(&self) -> impl Iterator<Item = (&Route, TransitionKind)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(r, k)| (r, *k)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 路由配置（两张表的组合）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteConfig {
    pub transitions: TransitionTable,
    pub relationships: RelationshipTable,
}

/// 配置文件的原始结构（效果名尚未校验）
#[derive(Debug, Deserialize)]
struct RawRouteConfig {
    #[serde(default)]
    transitions: BTreeMap<String, String>,
    #[serde(default)]
    relationships: BTreeMap<String, RouteRelationship>,
}

impl RouteConfig {
    /// 着陆页内置的路由表
    ///
    /// `/admin/analytics` 有关系条目但没有过渡条目，进入时回落为 fade。
    pub fn builtin() -> Self {
        let mut transitions = TransitionTable::new();
        transitions.insert("/", TransitionKind::Fade);
        transitions.insert("/admin", TransitionKind::SlideLeft);
        transitions.insert("/checkout", TransitionKind::SlideUp);
        transitions.insert("/checkout/success", TransitionKind::Scale);
        transitions.insert("/auth", TransitionKind::Flip);

        let mut relationships = RelationshipTable::new();
        relationships.insert(
            "/",
            RouteRelationship::new(None, ["/admin", "/checkout", "/auth"]),
        );
        relationships.insert(
            "/admin",
            RouteRelationship::new(Some("/"), ["/admin/analytics"]),
        );
        relationships.insert(
            "/admin/analytics",
            RouteRelationship::new(Some("/admin"), std::iter::empty::<&str>()),
        );
        relationships.insert(
            "/checkout",
            RouteRelationship::new(Some("/"), ["/checkout/success"]),
        );
        relationships.insert(
            "/checkout/success",
            RouteRelationship::new(Some("/checkout"), std::iter::empty::<&str>()),
        );
        relationships.insert(
            "/auth",
            RouteRelationship::new(Some("/"), std::iter::empty::<&str>()),
        );

        Self {
            transitions,
            relationships,
        }
    }

    /// 从 JSON 文本解析
    ///
    /// 所有路由在加载时规范化；未知效果名返回错误。
    pub fn from_json(text: &str) -> NavResult<Self> {
        let raw: RawRouteConfig = serde_json::from_str(text)?;

        let mut transitions = TransitionTable::new();
        for (route, name) in raw.transitions {
            transitions.insert(route, name.parse::<TransitionKind>()?);
        }

        let mut relationships = RelationshipTable::new();
        for (route, relationship) in raw.relationships {
            relationships.insert(route, relationship);
        }

        Ok(Self {
            transitions,
            relationships,
        })
    }

    /// 从文件加载
    pub fn load(path: impl AsRef<Path>) -> NavResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// 所有在任一张表中出现过的路由（排序、去重）
    pub fn known_routes(&self) -> Vec<Route> {
        let mut routes: Vec<Route> = self
            .transitions
            .iter()
            .map(|(r, _)| r.clone())
            .chain(self.relationships.iter().flat_map(|(r, rel)| {
                std::iter::once(r.clone())
                    .chain(rel.parent.iter().cloned())
                    .chain(rel.children.iter().cloned())
            }))
            .collect();
        routes.sort();
        routes.dedup();
        routes
    }
}
