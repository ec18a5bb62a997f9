use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dosebank_core::DosebankError;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("服务错误: {0}")]
    Dosebank(#[from] DosebankError),

    #[error("请求参数错误: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // 业务级拒绝：调用方必须能把"没有剂量了"和"系统坏了"区分开
            ApiError::Dosebank(DosebankError::InventoryNotFound { .. }) => {
                (StatusCode::NOT_FOUND, "Inventory not found".to_string())
            }
            ApiError::Dosebank(DosebankError::OutOfStock { .. }) => {
                (StatusCode::BAD_REQUEST, "No doses available".to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            // 系统级错误只在内部记录，响应不泄漏细节
            ApiError::Dosebank(err) => {
                error!("请求处理失败: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
