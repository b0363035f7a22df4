//! # HTTP 处理函数集成测试
//!
//! 直接调用处理函数，走 AppState → NavigationSessions → nav-runtime 的完整链路。
//! 不绑定端口，也不依赖外部服务。

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header::AUTHORIZATION};
use axum::response::IntoResponse;
use nav_runtime::{NavDirection, Route, TransitionKind};
use serde_json::json;

use site_host::analytics::AnalyticsReport;
use site_host::config::{AppConfig, AuthConfig};
use site_host::routes::{
    NavigateRequest, SESSION_HEADER, TransitionQuery, analytics_handler, create_intent_handler,
    get_content_handler, navigate_handler, navigation_state_handler, put_content_handler,
    session_handler, transition_handler,
};
use site_host::{AppError, AppState, GuardedOutcome, SharedState};

const ADMIN_TOKEN: &str = "admin-token";
const USER_TOKEN: &str = "user-token";

/// 创建测试用状态（内置路由表、内存内容、静态令牌）
fn test_state() -> SharedState {
    AppState::from_config(AppConfig {
        auth: AuthConfig {
            admin_tokens: vec![ADMIN_TOKEN.to_string()],
            user_tokens: vec![USER_TOKEN.to_string()],
        },
        ..AppConfig::default()
    })
}

fn headers(session: &str, token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(SESSION_HEADER, HeaderValue::from_str(session).unwrap());
    if let Some(token) = token {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
    }
    headers
}

async fn navigate(state: &SharedState, headers: &HeaderMap, route: &str) -> GuardedOutcome {
    let (_, Json(outcome)) = navigate_handler(
        State(state.clone()),
        headers.clone(),
        Json(NavigateRequest {
            route: route.to_string(),
        }),
    )
    .await;
    outcome
}

/// 管理员：/ → /admin → /
#[tokio::test]
async fn test_admin_navigation_scenario() {
    let state = test_state();
    let h = headers("tab-1", Some(ADMIN_TOKEN));

    let first = navigate(&state, &h, "/").await;
    assert_eq!(first.outcome.direction, NavDirection::NoHistory);
    assert_eq!(first.outcome.incoming.kind, TransitionKind::Fade);

    let second = navigate(&state, &h, "/admin").await;
    assert_eq!(second.outcome.direction, NavDirection::Forward);
    assert_eq!(second.outcome.incoming.kind, TransitionKind::SlideLeft);
    assert_eq!(second.redirected_from, None);

    let third = navigate(&state, &h, "/").await;
    assert_eq!(third.outcome.direction, NavDirection::Backward);
    assert_eq!(third.outcome.outgoing.unwrap().kind, TransitionKind::SlideRight);

    let Json(nav_state) = navigation_state_handler(State(state.clone()), h).await;
    assert_eq!(nav_state.previous_route, Some(Route::root()));
    assert_eq!(nav_state.direction, NavDirection::Backward);
}

/// 未携带会话 ID 的客户端各自开启新会话
#[tokio::test]
async fn test_clients_without_session_header_are_independent() {
    let state = test_state();
    let no_session = HeaderMap::new();

    let a = navigate(&state, &no_session, "/").await;
    assert_eq!(a.outcome.direction, NavDirection::NoHistory);

    let b = navigate(&state, &no_session, "/checkout").await;
    assert_eq!(b.outcome.direction, NavDirection::NoHistory);
    assert_eq!(b.outcome.from, None);
    assert!(b.outcome.outgoing.is_none());
    assert_ne!(a.session_id, b.session_id);
    assert_eq!(state.navigation.session_count(), 2);

    // 无会话 ID 时查询状态不会读到其他客户端的状态
    let Json(fresh) = navigation_state_handler(State(state.clone()), HeaderMap::new()).await;
    assert_eq!(fresh.previous_route, None);
}

/// 分配的会话 ID 通过响应头返回，后续请求带上即可延续会话
#[tokio::test]
async fn test_minted_session_id_continues_session() {
    let state = test_state();

    let (response_headers, Json(first)) = navigate_handler(
        State(state.clone()),
        HeaderMap::new(),
        Json(NavigateRequest {
            route: "/".to_string(),
        }),
    )
    .await;
    let minted = response_headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert_eq!(minted, first.session_id);

    let next = navigate(&state, &headers(&minted, None), "/checkout").await;
    assert_eq!(next.session_id, minted);
    assert_eq!(next.outcome.direction, NavDirection::Forward);
    assert_eq!(next.outcome.from, Some(Route::root()));
}

/// 非管理员访问管理页面被改写为登录页
#[tokio::test]
async fn test_admin_route_guard() {
    let state = test_state();
    let h = headers("visitor", Some(USER_TOKEN));

    navigate(&state, &h, "/").await;
    let guarded = navigate(&state, &h, "/admin/analytics").await;

    assert_eq!(guarded.redirected_from, Some(Route::new("/admin/analytics")));
    assert_eq!(guarded.outcome.to, Route::new("/auth"));
    assert_eq!(guarded.outcome.direction, NavDirection::Forward);
    assert_eq!(guarded.outcome.incoming.kind, TransitionKind::Flip);

    let json = serde_json::to_value(&guarded).unwrap();
    assert_eq!(json["redirected_from"], "/admin/analytics");
    assert_eq!(json["to"], "/auth");
}

#[tokio::test]
async fn test_transition_query_is_stateless() {
    let state = test_state();

    let Json(descriptor) = transition_handler(
        State(state.clone()),
        Query(TransitionQuery {
            route: "/checkout".to_string(),
            direction: NavDirection::Backward,
        }),
    )
    .await;
    assert_eq!(descriptor.kind, TransitionKind::SlideDown);

    let Json(unknown) = transition_handler(
        State(state.clone()),
        Query(TransitionQuery {
            route: "/nowhere".to_string(),
            direction: NavDirection::Backward,
        }),
    )
    .await;
    assert_eq!(unknown.kind, TransitionKind::Fade);
    assert_eq!(state.navigation.session_count(), 0);
}

#[tokio::test]
async fn test_content_requires_admin_to_write() {
    let state = test_state();
    let quote = json!({
        "text": "Feeling good is the engine of productivity.",
        "author": "Ali Abdaal"
    });

    let err = put_content_handler(
        State(state.clone()),
        headers("s", None),
        Path("quote".to_string()),
        Json(quote.clone()),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    let err = put_content_handler(
        State(state.clone()),
        headers("s", Some(USER_TOKEN)),
        Path("quote".to_string()),
        Json(quote.clone()),
    )
    .await
    .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);

    // 未写入前读取：未找到
    let missing = get_content_handler(State(state.clone()), Path("quote".to_string())).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    put_content_handler(
        State(state.clone()),
        headers("s", Some(ADMIN_TOKEN)),
        Path("quote".to_string()),
        Json(quote),
    )
    .await
    .unwrap();

    let Json(stored) = get_content_handler(State(state.clone()), Path("quote".to_string()))
        .await
        .unwrap();
    assert_eq!(stored["author"], "Ali Abdaal");
}

#[tokio::test]
async fn test_content_shape_and_unknown_section() {
    let state = test_state();
    let admin = headers("s", Some(ADMIN_TOKEN));

    let bad_shape = put_content_handler(
        State(state.clone()),
        admin.clone(),
        Path("testimonials".to_string()),
        Json(json!({ "name": "not a list" })),
    )
    .await
    .unwrap_err();
    assert_eq!(bad_shape.into_response().status(), StatusCode::BAD_REQUEST);

    let unknown = get_content_handler(State(state.clone()), Path("sidebar".to_string())).await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_session_handler() {
    let state = test_state();
    let Json(info) = session_handler(State(state.clone()), headers("s", Some(USER_TOKEN))).await;
    assert!(info.logged_in);
    assert!(!info.is_admin);
}

#[tokio::test]
async fn test_checkout_intent() {
    let state = test_state();

    let Json(response) = create_intent_handler(
        State(state.clone()),
        Json(
            serde_json::from_value(json!({
                "amount_cents": 2499,
                "product_name": "Feel-Good Productivity"
            }))
            .unwrap(),
        ),
    )
    .await
    .unwrap();
    assert!(response.client_secret.as_str().starts_with("pi_dev_"));

    let err = create_intent_handler(
        State(state.clone()),
        Json(serde_json::from_value(json!({ "amount_cents": 0, "product_name": "Book" })).unwrap()),
    )
    .await
    .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analytics_no_data_then_counts() {
    let state = test_state();
    let admin = headers("admin", Some(ADMIN_TOKEN));

    let Json(empty) = analytics_handler(State(state.clone()), admin.clone())
        .await
        .unwrap();
    assert_eq!(empty, AnalyticsReport::NoData);

    let visitor = headers("visitor", None);
    navigate(&state, &visitor, "/").await;
    navigate(&state, &visitor, "/checkout").await;
    navigate(&state, &visitor, "/checkout").await;

    let Json(report) = analytics_handler(State(state.clone()), admin).await.unwrap();
    match report {
        AnalyticsReport::Ok {
            page_views,
            total_views,
        } => {
            assert_eq!(total_views, 2);
            assert_eq!(page_views.get(&Route::new("/checkout")), Some(&1));
        }
        AnalyticsReport::NoData => panic!("应有访问数据"),
    }

    let denied = analytics_handler(State(state.clone()), headers("x", Some(USER_TOKEN))).await;
    assert!(matches!(denied, Err(AppError::Forbidden)));
}
