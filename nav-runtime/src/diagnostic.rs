//! # 诊断模块
//!
//! 路由表静态检查，不依赖 IO。
//!
//! ## 设计原则
//!
//! - 纯函数 API，可在无 IO 环境下运行
//! - 诊断分级：Error（必须修复）、Warn（建议修复）、Info（信息提示）
//! - 诊断结果不影响运行时行为：不一致的表在运行时只会退化为无方向

use std::collections::HashSet;

use crate::config::RouteConfig;
use crate::route::Route;

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 信息提示
    Info,
    /// 警告（建议修复）
    Warn,
    /// 错误（必须修复）
    Error,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 相关路由
    pub route: Route,
    /// 诊断消息
    pub message: String,
}

impl Diagnostic {
    pub fn error(route: &Route, message: impl Into<String>) -> Self {
        Self::with_level(DiagnosticLevel::Error, route, message)
    }

    pub fn warn(route: &Route, message: impl Into<String>) -> Self {
        Self::with_level(DiagnosticLevel::Warn, route, message)
    }

    pub fn info(route: &Route, message: impl Into<String>) -> Self {
        Self::with_level(DiagnosticLevel::Info, route, message)
    }

    fn with_level(level: DiagnosticLevel, route: &Route, message: impl Into<String>) -> Self {
        Self {
            level,
            route: route.clone(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.route, self.message)
    }
}

/// 诊断结果
#[derive(Debug, Clone, Default)]
pub struct DiagnosticResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: DiagnosticResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(DiagnosticLevel::Error)
    }

    pub fn warn_count(&self) -> usize {
        self.count(DiagnosticLevel::Warn)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 按最低级别过滤
    pub fn filter_by_level(&self, min_level: DiagnosticLevel) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level >= min_level)
            .collect()
    }
}

/// 检查路由表
///
/// - Error：路由把自己列为父/子；父链成环
/// - Warn：父子关系只在一侧声明
/// - Info：有关系无过渡（回落 fade）；有过渡无关系
pub fn analyze_routes(config: &RouteConfig) -> DiagnosticResult {
    let mut result = DiagnosticResult::new();
    let relationships = &config.relationships;

    for (route, rel) in relationships.iter() {
        if rel.has_parent(route) {
            result.push(Diagnostic::error(route, "路由把自己记为父路由"));
        }
        if rel.has_child(route) {
            result.push(Diagnostic::error(route, "路由把自己列为子路由"));
        }

        for child in rel.children.iter().filter(|c| *c != route) {
            if !relationships.lookup(child).has_parent(route) {
                result.push(Diagnostic::warn(
                    route,
                    format!("子路由 '{child}' 没有把它记为父路由"),
                ));
            }
        }

        if let Some(parent) = rel.parent.as_ref().filter(|p| *p != route)
            && !relationships.lookup(parent).has_child(route)
        {
            result.push(Diagnostic::warn(
                route,
                format!("父路由 '{parent}' 没有把它列为子路由"),
            ));
        }

        if !config.transitions.contains(route) {
            result.push(Diagnostic::info(route, "未配置过渡效果，将回落为 fade"));
        }
    }

    for (route, kind) in config.transitions.iter() {
        if !relationships.contains(route) {
            result.push(Diagnostic::info(
                route,
                format!("配置了过渡效果 '{kind}' 但没有关系条目，导航方向始终为无方向"),
            ));
        }
    }

    result.merge(find_parent_cycles(config));
    result
}

/// 沿父链查找环
fn find_parent_cycles(config: &RouteConfig) -> DiagnosticResult {
    let mut result = DiagnosticResult::new();
    let mut reported: HashSet<Route> = HashSet::new();

    for (start, _) in config.relationships.iter() {
        let mut seen: Vec<&Route> = vec![start];
        let mut current = config.relationships.lookup(start).parent.as_ref();

        while let Some(route) = current {
            if route == start {
                // 自环已单独报告
                if seen.len() > 1 && !seen.iter().any(|r| reported.contains(*r)) {
                    let chain: Vec<&str> = seen.iter().map(|r| r.as_str()).collect();
                    result.push(Diagnostic::error(
                        start,
                        format!("父链成环: {} -> {}", chain.join(" -> "), start),
                    ));
                    reported.extend(seen.iter().map(|r| (*r).clone()));
                }
                break;
            }
            if seen.contains(&route) {
                // 环不经过起点，由环上的路由报告
                break;
            }
            seen.push(route);
            current = config.relationships.lookup(route).parent.as_ref();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationship::{RelationshipTable, RouteRelationship};
    use crate::transition::TransitionKind;

    fn none() -> std::iter::Empty<&'static str> {
        std::iter::empty()
    }

    #[test]
    fn test_builtin_has_no_errors() {
        let result = analyze_routes(&RouteConfig::builtin());
        assert!(!result.has_errors());
        assert_eq!(result.warn_count(), 0);

        // /admin/analytics 没有过渡条目
        let infos = result.filter_by_level(DiagnosticLevel::Info);
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].route, Route::new("/admin/analytics"));
    }

    #[test]
    fn test_one_sided_relationships() {
        let mut relationships = RelationshipTable::new();
        relationships.insert("/a", RouteRelationship::new(None, ["/b"]));
        relationships.insert("/b", RouteRelationship::new(None, none()));
        relationships.insert("/c", RouteRelationship::new(Some("/a"), none()));

        let config = RouteConfig {
            relationships,
            ..RouteConfig::default()
        };
        let result = analyze_routes(&config);

        let warns: Vec<String> = result
            .filter_by_level(DiagnosticLevel::Warn)
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(
            warns,
            vec![
                "[WARN] /a: 子路由 '/b' 没有把它记为父路由".to_string(),
                "[WARN] /c: 父路由 '/a' 没有把它列为子路由".to_string(),
            ]
        );
    }

    #[test]
    fn test_self_reference() {
        let mut relationships = RelationshipTable::new();
        relationships.insert("/loop", RouteRelationship::new(Some("/loop"), ["/loop"]));
        let config = RouteConfig {
            relationships,
            ..RouteConfig::default()
        };

        let result = analyze_routes(&config);
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.warn_count(), 0);
    }

    #[test]
    fn test_parent_cycle_reported_once() {
        let mut relationships = RelationshipTable::new();
        relationships.insert("/x", RouteRelationship::new(Some("/y"), ["/y"]));
        relationships.insert("/y", RouteRelationship::new(Some("/x"), ["/x"]));
        let config = RouteConfig {
            relationships,
            ..RouteConfig::default()
        };

        let result = analyze_routes(&config);
        assert_eq!(result.error_count(), 1);
        assert!(result.diagnostics[..].iter().any(|d| d.message.contains("父链成环")));
    }

    #[test]
    fn test_transition_without_relationship() {
        let mut config = RouteConfig::default();
        config.transitions.insert("/orphan", TransitionKind::Rotate);

        let result = analyze_routes(&config);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Info);
        assert!(result.diagnostics[0].message.contains("rotate"));
    }
}
