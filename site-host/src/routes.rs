//! # Routes 模块
//!
//! HTTP 路由与处理函数。
//!
//! | 路径 | 说明 |
//! |------|------|
//! | `GET /health` | 健康检查 |
//! | `POST /api/navigation` | 会话导航，返回过渡结果 |
//! | `GET /api/navigation/state` | 会话当前导航状态 |
//! | `GET /api/transitions` | 静态查询某路由的过渡描述 |
//! | `GET/PUT /api/content/{section}` | 内容区块读写（写入需管理员） |
//! | `GET /api/session` | 当前鉴权结果 |
//! | `GET /api/checkout/product` | 结账商品信息 |
//! | `POST /api/checkout/intent` | 创建支付意图 |
//! | `POST /api/checkout/webhook` | 支付处理方回调 |
//! | `GET /api/admin/analytics` | 访问统计（需管理员） |

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, header},
    routing::{get, post},
};
use nav_runtime::{NavDirection, NavigationState, Route, TransitionDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, info, warn};

use crate::analytics::AnalyticsReport;
use crate::auth::SessionInfo;
use crate::content::SectionKind;
use crate::error::{AppError, AppResult};
use crate::navigation::{GuardedOutcome, guard_route, new_session_id};
use crate::payment::{ClientSecret, PaymentIntentRequest, WebhookEvent};
use crate::state::SharedState;

/// 会话 ID 请求头
///
/// 导航请求未携带时由服务端分配，并在同名响应头中返回。
pub const SESSION_HEADER: &str = "x-session-id";

/// 组装路由
pub fn build_router(state: SharedState) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/navigation", post(navigate_handler))
        .route("/api/navigation/state", get(navigation_state_handler))
        .route("/api/transitions", get(transition_handler))
        .route(
            "/api/content/{section}",
            get(get_content_handler).put(put_content_handler),
        )
        .route("/api/session", get(session_handler))
        .route("/api/checkout/product", get(product_handler))
        .route("/api/checkout/intent", post(create_intent_handler))
        .route("/api/checkout/webhook", post(webhook_handler))
        .route("/api/admin/analytics", get(analytics_handler));

    let router = match cors_layer(&state.config.cors_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "忽略无效的 CORS 来源");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                HeaderName::from_static(SESSION_HEADER),
            ])
            .expose_headers([HeaderName::from_static(SESSION_HEADER)]),
    )
}

fn client_session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// ========== 导航 ==========

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub route: String,
}

/// 会话导航
///
/// 没有会话 ID 的请求总是开启一个新会话，首次导航得到 `no-history`。
pub async fn navigate_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<NavigateRequest>,
) -> (HeaderMap, Json<GuardedOutcome>) {
    let session_id = client_session_id(&headers).unwrap_or_else(|| {
        let id = new_session_id();
        debug!(session = %id, "分配新会话");
        id
    });

    let session = state.session(&headers);
    let (route, redirected_from) = guard_route(Route::new(&request.route), &session);
    if let Some(requested) = &redirected_from {
        info!(requested = %requested, "非管理员访问管理页面，改写为登录页");
    }

    let outcome = state.navigation.navigate(&session_id, route);

    let mut response_headers = HeaderMap::new();
    match HeaderValue::from_str(&session_id) {
        Ok(value) => {
            response_headers.insert(SESSION_HEADER, value);
        }
        Err(_) => warn!(session = %session_id, "会话 ID 无法写入响应头"),
    }

    (
        response_headers,
        Json(GuardedOutcome {
            session_id,
            outcome,
            redirected_from,
        }),
    )
}

pub async fn navigation_state_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Json<NavigationState> {
    match client_session_id(&headers) {
        Some(id) => Json(state.navigation.state(&id)),
        None => Json(NavigationState::new()),
    }
}

#[derive(Debug, Deserialize)]
pub struct TransitionQuery {
    pub route: String,
    #[serde(default = "default_query_direction")]
    pub direction: NavDirection,
}

fn default_query_direction() -> NavDirection {
    NavDirection::None
}

/// 不影响任何会话的静态查询
pub async fn transition_handler(
    State(state): State<SharedState>,
    Query(query): Query<TransitionQuery>,
) -> Json<TransitionDescriptor> {
    let resolver = nav_runtime::TransitionResolver::new(state.navigation.config().clone());
    Json(resolver.descriptor(&Route::new(&query.route), query.direction))
}

// ========== 内容 ==========

pub async fn get_content_handler(
    State(state): State<SharedState>,
    Path(section): Path<String>,
) -> AppResult<Json<Value>> {
    let kind: SectionKind = section.parse()?;
    state
        .content
        .get(kind)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("内容区块 '{kind}' 尚未设置")))
}

pub async fn put_content_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(section): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    state.session(&headers).require_admin()?;

    let kind: SectionKind = section.parse()?;
    let normalized = kind.normalize(body)?;
    state.content.put(kind, normalized.clone());
    info!(section = %kind, "内容区块已更新");

    Ok(Json(normalized))
}

// ========== 会话 ==========

pub async fn session_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Json<SessionInfo> {
    Json(state.session(&headers))
}

// ========== 结账 ==========

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product_name: String,
    pub price_cents: u64,
    pub currency: String,
}

pub async fn product_handler(State(state): State<SharedState>) -> Json<ProductResponse> {
    let checkout = &state.config.checkout;
    Json(ProductResponse {
        product_name: checkout.product_name.clone(),
        price_cents: checkout.price_cents,
        currency: checkout.currency.clone(),
    })
}

#[derive(Debug, Serialize)]
pub struct IntentResponse {
    pub client_secret: ClientSecret,
}

pub async fn create_intent_handler(
    State(state): State<SharedState>,
    Json(request): Json<PaymentIntentRequest>,
) -> AppResult<Json<IntentResponse>> {
    request.validate()?;
    let client_secret = state
        .payments
        .create_intent(request.amount_cents, request.product_name.trim())?;
    Ok(Json(IntentResponse { client_secret }))
}

/// 扣款结果由支付处理方决定，这里只确认收到
pub async fn webhook_handler(Json(event): Json<WebhookEvent>) -> Json<Value> {
    info!(id = %event.id, event_type = %event.event_type, "收到支付回调");
    Json(json!({ "received": true }))
}

// ========== 管理后台 ==========

pub async fn analytics_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> AppResult<Json<AnalyticsReport>> {
    state.session(&headers).require_admin()?;
    Ok(Json(AnalyticsReport::from_page_views(
        state.navigation.page_views(),
    )))
}
