use axum::{extract::State, Json};
use dosebank_core::models::VitalsPayload;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::error::ApiResult;
use crate::response::ConfirmationResponse;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct IngestVitalsRequest {
    pub vitals: Value,
}

/// 摄取一批体征数据
///
/// CPU密集型变换在独立工作进程中执行，请求在此等待结果，
/// 但服务本身的事件循环不被阻塞。
pub async fn ingest_vitals(
    State(state): State<AppState>,
    Json(request): Json<IngestVitalsRequest>,
) -> ApiResult<ConfirmationResponse> {
    let outcome = state
        .ingestion
        .process_ingestion(VitalsPayload {
            vitals: request.vitals,
        })
        .await?;
    info!("体征摄取完成: 任务 {}", outcome.job_id);

    Ok(ConfirmationResponse::new("Vitals processed"))
}
