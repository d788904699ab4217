//! # 路由配置

use axum::Router;
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;

use super::handlers;
use super::dashboard::AppState;

/// 创建所有路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .nest("/api", api_routes())
        .with_state(state)
}

/// JSON API 路由；各自的 panic 转换成该接口自己的错误格式
fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/test",
            get(handlers::test_connection)
                .layer(CatchPanicLayer::custom(handlers::connection_test_panic)),
        )
        .route(
            "/monitors",
            get(handlers::list_monitors).layer(CatchPanicLayer::custom(handlers::monitors_panic)),
        )
}
