//! # Site Host
//!
//! Feel-Good Productivity 着陆页的宿主服务。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - HTTP 接口（axum）
//! - 按会话保存导航状态，调用 `nav-runtime` 解析过渡效果
//! - 内容区块读写、鉴权门禁、结账意图
//!
//! Host 层不包含导航判定逻辑，方向分类与效果选择全部由 `nav-runtime` 完成。
//! 鉴权、内容存储、支付都是外部协作方，这里只定义接口并提供开发用实现。

pub mod analytics;
pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod navigation;
pub mod payment;
pub mod routes;
pub mod state;

pub use analytics::AnalyticsReport;
pub use auth::{AuthService, SessionInfo, StaticTokenAuth};
pub use config::{AppConfig, ConfigError};
pub use content::{ContentStore, InMemoryContentStore, SectionKind};
pub use error::{AppError, AppResult};
pub use navigation::{GuardedOutcome, NavigationSessions};
pub use payment::{ClientSecret, DevPaymentProcessor, PaymentError, PaymentProcessor};
pub use routes::build_router;
pub use state::{AppState, SharedState};

use tokio::net::TcpListener;
use tracing::{info, warn};

/// 绑定地址并运行服务，直到收到退出信号
pub async fn serve(state: SharedState) -> anyhow::Result<()> {
    let address = state.config.bind_address();
    let app = build_router(state);

    let listener = TcpListener::bind(&address).await?;
    info!(address = %address, "服务已启动");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已关闭");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("收到 Ctrl+C，准备关闭"),
            Err(e) => {
                warn!(error = %e, "无法监听 Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("收到 terminate 信号，准备关闭");
            }
            Err(e) => {
                warn!(error = %e, "无法监听 terminate 信号");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
