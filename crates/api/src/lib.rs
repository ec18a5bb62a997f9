//! # Dosebank API
//!
//! 基于Axum的HTTP服务层，对外暴露三个端点：
//!
//! - `GET /hospital-status` 查询剩余库存
//! - `POST /reserve-dose` 为一位患者原子预约一剂
//! - `POST /ingest-vitals` 摄取体征数据并卸载CPU密集型变换
//!
//! 另有`GET /health`存活探针。业务级拒绝（库存不足、物品未知）
//! 与系统故障映射为可区分的状态码，系统错误细节只进日志不进响应。

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use dosebank_core::traits::{IngestionDispatcher, ReservationCoordinator};

use routes::{create_routes, AppState};

/// 组装完整的API应用（路由 + 中间件）
pub fn create_app(
    reservations: Arc<dyn ReservationCoordinator>,
    ingestion: Arc<dyn IngestionDispatcher>,
) -> Router {
    create_routes(AppState {
        reservations,
        ingestion,
    })
    .layer(axum::middleware::from_fn(middleware::request_logging))
    .layer(middleware::trace_layer())
    .layer(middleware::cors_layer())
}
