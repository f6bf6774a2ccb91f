//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping       GET   健康检查
//! - /api/generate   POST  生成三份文档变体 + 对话脚本
//! - /api/audio      POST  生成旁白音频
//! - /api/flowchart  POST  生成学习路线图
//! - /api/query      POST  针对文档的自由问答
//!
//! 四个生成端点只接受 POST；其余方法返回 405 + mock 响应体。

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route(
            "/generate",
            post(handlers::generate_docs).fallback(handlers::generate_method_not_allowed),
        )
        .route(
            "/audio",
            post(handlers::narrate).fallback(handlers::narrate_method_not_allowed),
        )
        .route(
            "/flowchart",
            post(handlers::generate_flowchart).fallback(handlers::flowchart_method_not_allowed),
        )
        .route(
            "/query",
            post(handlers::answer_query).fallback(handlers::query_method_not_allowed),
        )
}
