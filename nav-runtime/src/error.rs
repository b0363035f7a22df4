//! # Error 模块
//!
//! 定义 nav-runtime 中使用的错误类型。
//!
//! 导航与过渡解析本身没有失败路径（未知路由降级为 fade），
//! 这里只有路由表加载时可能出现的错误。

use thiserror::Error;

/// 路由表配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("无法读取路由配置 '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON 格式错误
    #[error("路由配置格式错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 未知的过渡效果名
    #[error("未知的过渡效果 '{name}'")]
    UnknownTransition { name: String },
}

/// Result 类型别名
pub type NavResult<T> = Result<T, ConfigError>;
