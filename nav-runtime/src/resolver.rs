//! # Navigation Transition Resolver
//!
//! 把一次路由变化翻译为 (a) 导航方向 与 (b) 具体的过渡描述。
//!
//! 这是 路由变化 → 过渡描述 的**唯一转换入口**，只依赖当前路由、上一路由和两张静态表。
//!
//! ## 分类规则
//!
//! | 条件 | 方向 |
//! |------|------|
//! | 上一路由未设置，或与新路由相同 | 保持原方向 |
//! | `relationship(prev).children` 包含 `new` | `Forward` |
//! | `relationship(new).parent == prev` | `Forward` |
//! | `relationship(prev).parent == new` | `Backward` |
//! | 其他 | `None` |
//!
//! 分类必须使用覆盖 `previous_route` **之前**的状态。

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::RouteConfig;
use crate::route::Route;
use crate::state::{NavDirection, NavigationState};
use crate::transition::{TransitionDescriptor, TransitionKind};

/// 纯查表的过渡解析器
///
/// 不持有任何导航状态，可在多个会话之间共享。
#[derive(Debug, Clone)]
pub struct TransitionResolver {
    config: Arc<RouteConfig>,
}

impl TransitionResolver {
    pub fn new(config: Arc<RouteConfig>) -> Self {
        Self { config }
    }

    /// 使用内置路由表
    pub fn builtin() -> Self {
        Self::new(Arc::new(RouteConfig::builtin()))
    }

    /// 路由表
    pub fn config(&self) -> &Arc<RouteConfig> {
        &self.config
    }

    /// 判断从 `previous` 到 `next` 的导航方向
    ///
    /// 前进检测信任子路由列表与父字段，后退检测只信任父字段。
    pub fn classify(&self, previous: &Route, next: &Route) -> NavDirection {
        let relationships = &self.config.relationships;
        let prev_rel = relationships.lookup(previous);

        if prev_rel.has_child(next) {
            NavDirection::Forward
        } else if relationships.lookup(next).has_parent(previous) {
            NavDirection::Forward
        } else if prev_rel.has_parent(next) {
            NavDirection::Backward
        } else {
            NavDirection::None
        }
    }

    /// 选择路由的过渡效果
    ///
    /// 未配置的路由回落为 `Fade`；后退时只翻转平移类效果。
    pub fn determine_transition(&self, route: &Route, direction: NavDirection) -> TransitionKind {
        let kind = self.config.transitions.get(route).unwrap_or_else(|| {
            tracing::debug!(route = %route, "路由未配置过渡效果，回落为 fade");
            TransitionKind::Fade
        });

        if direction.is_backward() {
            kind.reversed()
        } else {
            kind
        }
    }

    /// 生成路由的完整过渡描述
    pub fn descriptor(&self, route: &Route, direction: NavDirection) -> TransitionDescriptor {
        TransitionDescriptor::for_kind(self.determine_transition(route, direction))
    }
}

impl Default for TransitionResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

/// 一次导航的结果
///
/// 渲染约定：`outgoing.exit` 作用于离开的内容，`incoming.enter` 作用于进入的内容。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationOutcome {
    /// 来源路由（首次加载时为空）
    pub from: Option<Route>,
    /// 目标路由
    pub to: Route,
    /// 本次导航后的方向
    pub direction: NavDirection,
    /// 路由是否真的发生了变化
    pub changed: bool,
    /// 进入内容的过渡
    pub incoming: TransitionDescriptor,
    /// 离开内容的过渡（首次加载或重复导航时为空）
    pub outgoing: Option<TransitionDescriptor>,
}

/// 带状态的导航解析器
///
/// 每个客户端会话持有一份，独占其 [`NavigationState`]。
/// 通过 `&mut self` 保证读-改-写不被打断；跨线程共享时由调用方加锁。
#[derive(Debug, Clone)]
pub struct NavigationResolver {
    resolver: TransitionResolver,
    state: NavigationState,
}

impl NavigationResolver {
    pub fn new(resolver: TransitionResolver) -> Self {
        Self {
            resolver,
            state: NavigationState::new(),
        }
    }

    /// 使用共享路由表创建
    pub fn with_config(config: Arc<RouteConfig>) -> Self {
        Self::new(TransitionResolver::new(config))
    }

    /// 当前状态
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// 当前方向
    pub fn direction(&self) -> NavDirection {
        self.state.direction
    }

    /// 无状态解析器
    pub fn resolver(&self) -> &TransitionResolver {
        &self.resolver
    }

    /// 处理一次路由变化
    ///
    /// 1. 上一路由存在且不同于新路由时重新分类方向
    /// 2. 无条件把上一路由更新为新路由
    pub fn on_route_change(&mut self, new_route: &Route) -> NavDirection {
        if let Some(previous) = &self.state.previous_route
            && previous != new_route
        {
            self.state.direction = self.resolver.classify(previous, new_route);
        }

        self.state.previous_route = Some(new_route.clone());
        self.state.current_route = Some(new_route.clone());
        self.state.direction
    }

    /// 基于当前方向选择路由的过渡效果
    pub fn determine_transition(&self, route: &Route) -> TransitionKind {
        self.resolver.determine_transition(route, self.state.direction)
    }

    /// 导航到新路由，返回完整的过渡结果
    pub fn navigate(&mut self, route: impl Into<Route>) -> NavigationOutcome {
        let to = route.into();
        let from = self.state.previous_route.clone();
        let changed = from.as_ref() != Some(&to);

        let direction = self.on_route_change(&to);

        let incoming = self.resolver.descriptor(&to, direction);
        let outgoing = from
            .as_ref()
            .filter(|_| changed)
            .map(|prev| self.resolver.descriptor(prev, direction));

        tracing::debug!(
            from = ?from.as_ref().map(Route::as_str),
            to = %to,
            ?direction,
            kind = %incoming.kind,
            "导航"
        );

        NavigationOutcome {
            from,
            to,
            direction,
            changed,
            incoming,
            outgoing,
        }
    }

    /// 重置为初始状态（相当于重新启动会话）
    pub fn reset(&mut self) {
        self.state = NavigationState::new();
    }
}

impl Default for NavigationResolver {
    fn default() -> Self {
        Self::new(TransitionResolver::builtin())
    }
}
