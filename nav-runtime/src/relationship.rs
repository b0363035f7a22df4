//! # Relationship 模块
//!
//! 路由之间的父子关系表，用于推断导航方向。
//!
//! 关系表不要求双向一致：A 把 B 列为子路由时，B 不一定把 A 记为父路由。
//! 分类时两个方向各自独立检查，不一致的数据只会得到"无方向"结果，不会报错。
//! 不一致由 [`diagnostic`](crate::diagnostic) 模块在静态检查中报告。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::route::Route;

/// 单个路由的关系条目
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteRelationship {
    /// 父路由
    #[serde(default)]
    pub parent: Option<Route>,
    /// 子路由集合
    #[serde(default)]
    pub children: BTreeSet<Route>,
}

/// 未配置路由的关系：无父、无子
static EMPTY_RELATIONSHIP: RouteRelationship = RouteRelationship {
    parent: None,
    children: BTreeSet::new(),
};

impl RouteRelationship {
    /// 创建关系条目
    pub fn new<I, R>(parent: Option<&str>, children: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Route>,
    {
        Self {
            parent: parent.map(Route::new),
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// 是否包含指定子路由
    pub fn has_child(&self, route: &Route) -> bool {
        self.children.contains(route)
    }

    /// 父路由是否为指定路由
    pub fn has_parent(&self, route: &Route) -> bool {
        self.parent.as_ref() == Some(route)
    }
}

/// 路由关系表
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipTable {
    entries: HashMap<Route, RouteRelationship>,
}

impl RelationshipTable {
    /// 创建空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入（或覆盖）一个路由的关系
    pub fn insert(&mut self, route: impl Into<Route>, relationship: RouteRelationship) {
        self.entries.insert(route.into(), relationship);
    }

    /// 查询关系
    ///
    /// 未配置的路由返回空关系（无父、无子），从不失败。
    pub fn lookup(&self, route: &Route) -> &RouteRelationship {
        self.entries.get(route).unwrap_or(&EMPTY_RELATIONSHIP)
    }

    /// 是否显式配置了该路由
    pub fn contains(&self, route: &Route) -> bool {
        self.entries.contains_key(route)
    }

    /// 遍历所有条目（按路由排序，便于输出稳定）
    pub fn iter(&self) -> impl Iterator<Item = (&Route, &RouteRelationship)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
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
