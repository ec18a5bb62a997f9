use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    health::health_check, inventory::get_hospital_status, reservations::reserve_dose,
    vitals::ingest_vitals,
};

/// API应用状态
#[derive(Clone)]
pub struct AppState {
    pub reservations: Arc<dyn dosebank_core::traits::ReservationCoordinator>,
    pub ingestion: Arc<dyn dosebank_core::traits::IngestionDispatcher>,
}

/// 创建API路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 库存与预约
        .route("/hospital-status", get(get_hospital_status))
        .route("/reserve-dose", post(reserve_dose))
        // 体征摄取
        .route("/ingest-vitals", post(ingest_vitals))
        .with_state(state)
}
