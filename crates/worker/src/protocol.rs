use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 投递给Worker进程的任务
///
/// 每次进程调用处理恰好一个任务，任务之间不共享任何状态。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerJob {
    pub job_id: Uuid,
    pub vitals: serde_json::Value,
    pub rounds: u32,
}

/// Worker进程回传的唯一一条完成消息
///
/// 成功携带`result`，失败携带`error`，二者互斥。没有消息的
/// 非零退出表示异常终止，由调度侧处理。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerMessage {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WorkerMessage {
    pub fn success(result: String) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error),
        }
    }
}
