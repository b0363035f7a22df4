//! # Error 模块
//!
//! HTTP 层错误类型。每个变体对应一个状态码，响应体为 `{"error": 消息}`。
//!
//! 导航解析本身不会失败，这里只覆盖鉴权、内容、支付这些外部协作方的失败。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::payment::PaymentError;

#[derive(Error, Debug)]
pub enum AppError {
    /// 请求体格式或取值不合法
    #[error("请求无效: {0}")]
    BadRequest(String),

    /// 未登录
    #[error("需要登录")]
    Unauthorized,

    /// 已登录但不是管理员
    #[error("需要管理员权限")]
    Forbidden,

    /// 资源不存在
    #[error("未找到: {0}")]
    NotFound(String),

    /// 支付服务失败
    #[error("支付服务错误: {0}")]
    Payment(#[from] PaymentError),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Payment(PaymentError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            AppError::Payment(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "请求处理失败");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
