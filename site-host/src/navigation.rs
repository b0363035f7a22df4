//! # Navigation 模块
//!
//! 按会话保存 [`NavigationResolver`]，把 HTTP 请求中的路由变化交给它处理。
//!
//! ## 并发模型
//!
//! 核心解析器是单线程、`&mut self` 的；HTTP 请求会并发到达，
//! 所以所有会话放在同一把 `Mutex` 后面，读-改-写在锁内一次完成，持锁期间不 `.await`。
//! 路由表通过 `Arc<RouteConfig>` 只读共享。

use nav_runtime::{
    NavigationHistory, NavigationOutcome, NavigationResolver, NavigationState, Route, RouteConfig,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::auth::SessionInfo;

/// 管理页面前缀
pub const ADMIN_PREFIX: &str = "/admin";
/// 未授权访问管理页面时改写到的登录页
pub const LOGIN_ROUTE: &str = "/auth";

/// 带门禁信息的导航结果
#[derive(Debug, Clone, Serialize)]
pub struct GuardedOutcome {
    /// 本次导航所属的会话
    pub session_id: String,
    #[serde(flatten)]
    pub outcome: NavigationOutcome,
    /// 被改写前的目标路由（未改写时为空）
    pub redirected_from: Option<Route>,
}

/// 管理页面门禁
///
/// 非管理员访问 `/admin` 及其子路由时改写为登录页。
pub fn guard_route(requested: Route, session: &SessionInfo) -> (Route, Option<Route>) {
    if requested.is_under(&Route::new(ADMIN_PREFIX)) && !session.is_admin {
        (Route::new(LOGIN_ROUTE), Some(requested))
    } else {
        (requested, None)
    }
}

/// 为未携带会话 ID 的客户端分配新会话
pub fn new_session_id() -> String {
    Uuid::now_v7().to_string()
}

struct SessionEntry {
    resolver: NavigationResolver,
    last_touched: u64,
}

struct SessionTable {
    sessions: HashMap<String, SessionEntry>,
    clock: u64,
    history: NavigationHistory,
}

/// 所有会话的导航状态
pub struct NavigationSessions {
    config: Arc<RouteConfig>,
    max_sessions: usize,
    inner: Mutex<SessionTable>,
}

impl NavigationSessions {
    pub fn new(config: Arc<RouteConfig>, max_sessions: usize, history_limit: usize) -> Self {
        Self {
            config,
            max_sessions: max_sessions.max(1),
            inner: Mutex::new(SessionTable {
                sessions: HashMap::new(),
                clock: 0,
                history: NavigationHistory::new().with_max_events(history_limit),
            }),
        }
    }

    /// 共享的路由表
    pub fn config(&self) -> &Arc<RouteConfig> {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, SessionTable> {
        // 锁内没有会 panic 的用户代码，中毒时直接沿用内部数据
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 处理某个会话的一次路由变化
    pub fn navigate(&self, session_id: &str, route: Route) -> NavigationOutcome {
        let mut table = self.lock();
        table.clock += 1;
        let now = table.clock;

        if !table.sessions.contains_key(session_id) && table.sessions.len() >= self.max_sessions {
            evict_oldest(&mut table.sessions);
        }

        let entry = table
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry {
                resolver: NavigationResolver::with_config(self.config.clone()),
                last_touched: now,
            });
        entry.last_touched = now;
        let outcome = entry.resolver.navigate(route);

        table.history.record(&outcome);

        tracing::debug!(
            session = session_id,
            from = ?outcome.from.as_ref().map(Route::as_str),
            to = %outcome.to,
            direction = ?outcome.direction,
            "会话导航"
        );

        outcome
    }

    /// 会话的当前状态；未知会话返回初始状态
    pub fn state(&self, session_id: &str) -> NavigationState {
        self.lock()
            .sessions
            .get(session_id)
            .map(|entry| entry.resolver.state().clone())
            .unwrap_or_default()
    }

    /// 当前会话数
    pub fn session_count(&self) -> usize {
        self.lock().sessions.len()
    }

    /// 各路由的访问次数
    pub fn page_views(&self) -> BTreeMap<Route, u64> {
        self.lock().history.page_views()
    }
}

fn evict_oldest(sessions: &mut HashMap<String, SessionEntry>) {
    let oldest = sessions
        .iter()
        .min_by_key(|(_, entry)| entry.last_touched)
        .map(|(id, _)| id.clone());

    if let Some(id) = oldest {
        tracing::debug!(session = %id, "会话数达到上限，淘汰最久未访问的会话");
        sessions.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav_runtime::{NavDirection, TransitionKind};

    fn sessions(max: usize) -> NavigationSessions {
        NavigationSessions::new(Arc::new(RouteConfig::builtin()), max, 100)
    }

    #[test]
    fn test_sessions_are_independent() {
        let s = sessions(10);
        s.navigate("a", Route::new("/"));
        s.navigate("b", Route::new("/checkout"));

        let a = s.navigate("a", Route::new("/admin"));
        assert_eq!(a.direction, NavDirection::Forward);

        let b = s.navigate("b", Route::new("/"));
        assert_eq!(b.direction, NavDirection::Backward);
        assert_eq!(b.outgoing.unwrap().kind, TransitionKind::SlideDown);
    }

    #[test]
    fn test_unknown_session_state() {
        let s = sessions(10);
        assert_eq!(s.state("ghost"), NavigationState::new());
    }

    #[test]
    fn test_eviction_of_oldest() {
        let s = sessions(2);
        s.navigate("first", Route::new("/"));
        s.navigate("second", Route::new("/"));
        s.navigate("first", Route::new("/checkout"));
        s.navigate("third", Route::new("/"));

        assert_eq!(s.session_count(), 2);
        // second 最久未访问，被淘汰
        assert_eq!(s.state("second"), NavigationState::new());
        assert_eq!(s.state("first").current_route, Some(Route::new("/checkout")));
    }

    #[test]
    fn test_new_session_ids_are_distinct() {
        let a = new_session_id();
        let b = new_session_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_guard_route() {
        let anonymous = SessionInfo::ANONYMOUS;
        let admin = SessionInfo {
            logged_in: true,
            is_admin: true,
        };

        let (route, from) = guard_route(Route::new("/admin/analytics"), &anonymous);
        assert_eq!(route, Route::new("/auth"));
        assert_eq!(from, Some(Route::new("/admin/analytics")));

        let (route, from) = guard_route(Route::new("/admin"), &admin);
        assert_eq!(route, Route::new("/admin"));
        assert_eq!(from, None);

        let (route, _) = guard_route(Route::new("/checkout"), &anonymous);
        assert_eq!(route, Route::new("/checkout"));
    }

    #[test]
    fn test_page_views_across_sessions() {
        let s = sessions(10);
        s.navigate("a", Route::new("/"));
        s.navigate("b", Route::new("/"));
        s.navigate("b", Route::new("/"));

        let views = s.page_views();
        assert_eq!(views.get(&Route::root()), Some(&2));
    }
}
