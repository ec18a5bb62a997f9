use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ApiResult;
use crate::routes::AppState;

/// 查询当前剩余库存
pub async fn get_hospital_status(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let count = state.reservations.current_stock().await?;
    debug!("库存查询: 剩余 {count} 剂");
    Ok(Json(json!({ "count": count })))
}
