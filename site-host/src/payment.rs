//! # Payment 模块
//!
//! 支付处理方接口：给定金额与商品名，返回挂载支付表单用的 client secret。
//! 扣款成功与否完全交给支付处理方的 webhook 回调。

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// 支付错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    /// 请求参数不合法
    #[error("支付请求无效: {0}")]
    InvalidRequest(String),

    /// 支付处理方返回失败
    #[error("支付处理方失败: {0}")]
    Upstream(String),
}

/// 不透明的 client secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(pub String);

impl ClientSecret {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 创建支付意图的请求
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntentRequest {
    /// 金额（最小货币单位）
    pub amount_cents: u64,
    /// 商品名
    pub product_name: String,
}

impl PaymentIntentRequest {
    /// 校验请求
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.amount_cents == 0 {
            return Err(PaymentError::InvalidRequest("金额必须大于 0".to_string()));
        }
        if self.product_name.trim().is_empty() {
            return Err(PaymentError::InvalidRequest("商品名不能为空".to_string()));
        }
        Ok(())
    }
}

/// 支付处理方
pub trait PaymentProcessor: Send + Sync {
    /// 创建支付意图，返回 client secret
    fn create_intent(
        &self,
        amount_cents: u64,
        product_name: &str,
    ) -> Result<ClientSecret, PaymentError>;
}

/// 开发用支付处理方
///
/// 只生成形如 `pi_dev_<n>_secret_<hex>` 的 secret，不产生真实扣款。
#[derive(Debug)]
pub struct DevPaymentProcessor {
    currency: String,
    next_id: AtomicU64,
}

impl DevPaymentProcessor {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl PaymentProcessor for DevPaymentProcessor {
    fn create_intent(
        &self,
        amount_cents: u64,
        product_name: &str,
    ) -> Result<ClientSecret, PaymentError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let mut hasher = DefaultHasher::new();
        (id, amount_cents, product_name, &self.currency).hash(&mut hasher);

        tracing::info!(
            intent = id,
            amount_cents,
            currency = %self.currency,
            product = product_name,
            "创建开发用支付意图"
        );

        Ok(ClientSecret(format!(
            "pi_dev_{id}_secret_{:016x}",
            hasher.finish()
        )))
    }
}

/// 支付处理方的 webhook 事件（只取需要的字段）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let ok = PaymentIntentRequest {
            amount_cents: 2499,
            product_name: "Feel-Good Productivity".to_string(),
        };
        assert!(ok.validate().is_ok());

        let zero = PaymentIntentRequest {
            amount_cents: 0,
            ..ok.clone()
        };
        assert!(matches!(zero.validate(), Err(PaymentError::InvalidRequest(_))));

        let unnamed = PaymentIntentRequest {
            product_name: " ".to_string(),
            ..ok
        };
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_dev_processor_unique_secrets() {
        let processor = DevPaymentProcessor::new("usd");
        let a = processor.create_intent(2499, "Book").unwrap();
        let b = processor.create_intent(2499, "Book").unwrap();

        assert!(a.as_str().starts_with("pi_dev_1_secret_"));
        assert!(b.as_str().starts_with("pi_dev_2_secret_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_webhook_event_type_field() {
        let event: WebhookEvent =
            serde_json::from_str(r#"{"id":"evt_1","type":"payment_intent.succeeded","extra":1}"#)
                .unwrap();
        assert_eq!(event.event_type, "payment_intent.succeeded");
    }
}
