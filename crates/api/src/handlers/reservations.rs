use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::response::ConfirmationResponse;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveDoseRequest {
    pub patient_id: String,
}

/// 为一位患者预约一剂
///
/// 预约在单个数据库事务内完成，并发调用方在行锁上排队，
/// 库存绝不会被超卖。
pub async fn reserve_dose(
    State(state): State<AppState>,
    Json(request): Json<ReserveDoseRequest>,
) -> ApiResult<ConfirmationResponse> {
    if request.patient_id.trim().is_empty() {
        return Err(ApiError::BadRequest("patientId is required".to_string()));
    }

    let reservation = state.reservations.reserve_dose(&request.patient_id).await?;
    info!(
        "预约成功: 患者 {} -> 预约 #{}",
        request.patient_id, reservation.id
    );

    Ok(ConfirmationResponse::new("Dose reserved"))
}
