use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{IngestionOutcome, VitalsPayload};

/// 摄取调度器：把CPU密集型变换转交给隔离的计算Worker
///
/// 调用方的逻辑任务在等待Worker完成信号期间挂起，但底层线程
/// 不被阻塞，其他并发请求照常服务。调度器必须在有限时间内
/// 解析出三种结局之一：成功消息、失败消息、异常终止（含超时），
/// 绝不让调用方无限等待。
#[async_trait]
pub trait IngestionDispatcher: Send + Sync {
    /// 处理一次体征摄取：每个任务使用独立的执行上下文，
    /// 任务之间不共享任何状态，变换恰好执行一次。
    async fn process_ingestion(&self, payload: VitalsPayload) -> Result<IngestionOutcome>;
}
