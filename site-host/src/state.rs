//! # State 模块
//!
//! 服务共享状态：配置、路由表、导航会话以及各外部协作方。

use axum::http::HeaderMap;
use nav_runtime::{DiagnosticLevel, RouteConfig, analyze_routes};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::auth::{AuthService, SessionInfo, StaticTokenAuth, bearer_token};
use crate::config::AppConfig;
use crate::content::{ContentStore, InMemoryContentStore};
use crate::navigation::NavigationSessions;
use crate::payment::{DevPaymentProcessor, PaymentProcessor};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: AppConfig,
    pub navigation: NavigationSessions,
    pub content: Arc<dyn ContentStore>,
    pub auth: Arc<dyn AuthService>,
    pub payments: Arc<dyn PaymentProcessor>,
}

impl AppState {
    /// 用显式给出的协作方组装状态
    pub fn new(
        config: AppConfig,
        routes: Arc<RouteConfig>,
        content: Arc<dyn ContentStore>,
        auth: Arc<dyn AuthService>,
        payments: Arc<dyn PaymentProcessor>,
    ) -> Self {
        let navigation = NavigationSessions::new(
            routes,
            config.navigation.max_sessions,
            config.navigation.history_limit,
        );
        Self {
            config,
            navigation,
            content,
            auth,
            payments,
        }
    }

    /// 按配置组装开发环境的状态
    ///
    /// 路由表与内容初始数据加载失败时只输出警告，不阻塞启动。
    pub fn from_config(config: AppConfig) -> SharedState {
        let routes = Arc::new(load_route_config(&config));

        let content = InMemoryContentStore::new();
        if let Some(path) = &config.content_seed_path
            && let Err(e) = content.seed_from_file(path)
        {
            warn!(path = %path.display(), error = %e, "内容初始数据加载失败");
        }

        let auth = StaticTokenAuth::new(&config.auth);
        let payments = DevPaymentProcessor::new(config.checkout.currency.clone());

        Arc::new(Self::new(
            config,
            routes,
            Arc::new(content),
            Arc::new(auth),
            Arc::new(payments),
        ))
    }

    /// 解析请求的鉴权结果
    pub fn session(&self, headers: &HeaderMap) -> SessionInfo {
        self.auth.check(bearer_token(headers))
    }
}

/// 加载路由表并输出诊断
pub fn load_route_config(config: &AppConfig) -> RouteConfig {
    let routes = match &config.routes_path {
        Some(path) => match RouteConfig::load(path) {
            Ok(routes) => {
                info!(path = %path.display(), "路由表加载成功");
                routes
            }
            Err(e) => {
                warn!(error = %e, "路由表加载失败，使用内置路由表");
                RouteConfig::builtin()
            }
        },
        None => RouteConfig::builtin(),
    };

    for diagnostic in analyze_routes(&routes).diagnostics {
        match diagnostic.level {
            DiagnosticLevel::Error => error!("{diagnostic}"),
            DiagnosticLevel::Warn => warn!("{diagnostic}"),
            DiagnosticLevel::Info => info!("{diagnostic}"),
        }
    }

    routes
}
