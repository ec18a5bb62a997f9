use axum::Json;
use serde_json::{json, Value};

/// 健康检查端点
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
        "service": "dosebank",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
