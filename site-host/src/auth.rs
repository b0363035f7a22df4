//! # Auth 模块
//!
//! 鉴权服务接口。会话的真实管理由外部服务负责，这里只消费
//! `{logged_in, is_admin}` 这个结果，把它当作管理页面的布尔门禁。

use axum::http::{HeaderMap, header::AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

/// 当前会话的鉴权结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionInfo {
    pub logged_in: bool,
    pub is_admin: bool,
}

impl SessionInfo {
    /// 未登录
    pub const ANONYMOUS: SessionInfo = SessionInfo {
        logged_in: false,
        is_admin: false,
    };

    /// 要求管理员权限
    pub fn require_admin(&self) -> AppResult<()> {
        match (self.logged_in, self.is_admin) {
            (false, _) => Err(AppError::Unauthorized),
            (true, false) => Err(AppError::Forbidden),
            (true, true) => Ok(()),
        }
    }
}

/// 鉴权服务
pub trait AuthService: Send + Sync {
    /// 校验令牌，返回会话信息；令牌缺失或无效时视为未登录
    fn check(&self, token: Option<&str>) -> SessionInfo;
}

/// 静态令牌鉴权（开发用）
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuth {
    admin_tokens: HashSet<String>,
    user_tokens: HashSet<String>,
}

impl StaticTokenAuth {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            admin_tokens: config.admin_tokens.iter().cloned().collect(),
            user_tokens: config.user_tokens.iter().cloned().collect(),
        }
    }
}

impl AuthService for StaticTokenAuth {
    fn check(&self, token: Option<&str>) -> SessionInfo {
        match token {
            Some(t) if self.admin_tokens.contains(t) => SessionInfo {
                logged_in: true,
                is_admin: true,
            },
            Some(t) if self.user_tokens.contains(t) => SessionInfo {
                logged_in: true,
                is_admin: false,
            },
            _ => SessionInfo::ANONYMOUS,
        }
    }
}

/// 从 `Authorization: Bearer <token>` 中取出令牌
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
