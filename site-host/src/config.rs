//! # Config 模块
//!
//! 宿主服务配置，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 监听配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 路由表文件（JSON）
    ///
    /// 未配置或加载失败时使用内置路由表。
    #[serde(default)]
    pub routes_path: Option<PathBuf>,

    /// 内容初始数据文件（JSON，section 名 → 内容）
    #[serde(default)]
    pub content_seed_path: Option<PathBuf>,

    /// 鉴权配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 结账配置
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// 导航会话配置
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// 允许跨域的来源；为空时不启用 CORS
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// 监听配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// 鉴权配置
///
/// 开发用的静态令牌；真正的会话管理由外部服务负责。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// 管理员令牌
    #[serde(default)]
    pub admin_tokens: Vec<String>,

    /// 普通用户令牌
    #[serde(default)]
    pub user_tokens: Vec<String>,
}

/// 结账配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// 商品名
    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// 价格（最小货币单位）
    #[serde(default = "default_price_cents")]
    pub price_cents: u64,

    /// 货币代码
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// 导航会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// 同时保留的最大会话数，超出时淘汰最久未访问的会话
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// 导航历史最大记录数
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

// 默认值函数
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_product_name() -> String {
    "Feel-Good Productivity".to_string()
}

fn default_price_cents() -> u64 {
    2499
}

fn default_currency() -> String {
    "usd".to_string()
}

fn default_max_sessions() -> usize {
    10_000
}

fn default_history_limit() -> usize {
    nav_runtime::history::DEFAULT_MAX_EVENTS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            routes_path: None,
            content_seed_path: None,
            auth: AuthConfig::default(),
            checkout: CheckoutConfig::default(),
            navigation: NavigationConfig::default(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            product_name: default_product_name(),
            price_cents: default_price_cents(),
            currency: default_currency(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            history_limit: default_history_limit(),
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并输出警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = %path.display(), "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 监听地址
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationFailed("端口不能为 0".to_string()));
        }

        if self.checkout.product_name.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "checkout.product_name 不能为空".to_string(),
            ));
        }

        if self.checkout.price_cents == 0 {
            return Err(ConfigError::ValidationFailed(
                "checkout.price_cents 必须大于 0".to_string(),
            ));
        }

        if self.navigation.max_sessions == 0 {
            return Err(ConfigError::ValidationFailed(
                "navigation.max_sessions 必须大于 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(#[from] serde_json::Error),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(#[from] std::io::Error),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.navigation.max_sessions, 10_000);
        assert!(config.routes_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "server": { "port": 3000 }, "auth": { "admin_tokens": ["t"] } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.admin_tokens, vec!["t".to_string()]);
        assert_eq!(config.checkout.price_cents, 2499);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();

        let loaded: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.server.port, config.server.port);
        assert_eq!(loaded.checkout.currency, "usd");
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.server.port = 0;
        assert!(config.validate().is_err());
        config.server.port = 8080;

        config.checkout.price_cents = 0;
        assert!(config.validate().is_err());
        config.checkout.price_cents = 100;

        config.checkout.product_name = "  ".to_string();
        assert!(config.validate().is_err());
        config.checkout.product_name = "Book".to_string();

        config.navigation.max_sessions = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.server.port = 9090;
        config.cors_origins = vec!["https://example.com".to_string()];
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path);
        assert_eq!(loaded.server.port, 9090);
        assert_eq!(loaded.cors_origins, config.cors_origins);
    }

    #[test]
    fn test_load_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ port: ").unwrap();

        assert_eq!(AppConfig::load(&path).server.port, 8080);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = AppConfig::load("no/such/config.json");
        assert_eq!(config.server.port, 8080);
    }
}
