use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 一次体征摄取请求的原始载荷
///
/// 对核心来说内容不透明，只负责原样传给计算Worker。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsPayload {
    pub vitals: serde_json::Value,
}

/// 摄取任务的处理结果
///
/// 仅在一次dispatch-and-await周期内存在，不做持久化。
/// `result`为Worker产出的变换摘要，调度器确认观察到即视为处理完成。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionOutcome {
    pub job_id: Uuid,
    pub result: String,
}
