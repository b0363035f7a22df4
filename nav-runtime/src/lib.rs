//! # Nav Runtime
//!
//! 着陆页导航过渡的纯逻辑核心。
//!
//! ## 架构概述
//!
//! `nav-runtime` 不依赖任何 IO 循环或渲染引擎（只有可选的路由表文件加载）。
//! 它只对外部路由层给出的路由字符串做出反应：
//!
//! ```text
//! Router                     NavigationResolver                  渲染层
//!   │                              │                               │
//!   │──── new route ─────────────►│ classify + determine          │
//!   │                              │──── NavigationOutcome ───────►│
//! ```
//!
//! ## 核心类型
//!
//! - [`Route`]：规范化的路由
//! - [`RouteConfig`]：过渡表 + 关系表
//! - [`NavigationResolver`]：持有 [`NavigationState`]，处理路由变化
//! - [`TransitionDescriptor`]：交给渲染层的过渡描述
//!
//! ## 使用示例
//!
//! ```ignore
//! use nav_runtime::NavigationResolver;
//!
//! let mut nav = NavigationResolver::default();
//! nav.navigate("/");
//! let outcome = nav.navigate("/admin");
//! assert_eq!(outcome.incoming.kind, TransitionKind::SlideLeft);
//! ```
//!
//! ## 模块结构
//!
//! - [`route`]：路由规范化
//! - [`relationship`]：父子关系表
//! - [`config`]：路由表加载与内置表
//! - [`transition`]：效果类型、时长、关键帧
//! - [`state`]：导航状态与方向
//! - [`resolver`]：方向分类与效果选择
//! - [`history`]：导航历史
//! - [`diagnostic`]：路由表静态检查

pub mod config;
pub mod diagnostic;
pub mod easing;
pub mod error;
pub mod history;
pub mod relationship;
pub mod resolver;
pub mod route;
pub mod state;
pub mod transition;

// 重导出核心类型
pub use config::{RouteConfig, TransitionTable};
pub use diagnostic::{Diagnostic, DiagnosticLevel, DiagnosticResult, analyze_routes};
pub use easing::EasingFunction;
pub use error::{ConfigError, NavResult};
pub use history::{NavigationEvent, NavigationHistory};
pub use relationship::{RelationshipTable, RouteRelationship};
pub use resolver::{NavigationOutcome, NavigationResolver, TransitionResolver};
pub use route::Route;
pub use state::{NavDirection, NavigationState};
pub use transition::{Motion, PhaseTiming, Pose, TransitionDescriptor, TransitionKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let mut nav = NavigationResolver::default();
        let outcome = nav.navigate(Route::root());
        assert_eq!(outcome.incoming, TransitionDescriptor::default());
        assert!(!analyze_routes(&RouteConfig::builtin()).has_errors());
        let _history = NavigationHistory::new();
    }
}
