use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dosebank_core::config::WorkerConfig;
use dosebank_core::models::{IngestionOutcome, VitalsPayload};
use dosebank_core::traits::IngestionDispatcher;
use dosebank_core::{DosebankError, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::protocol::{WorkerJob, WorkerMessage};

/// 基于子进程的摄取调度器
///
/// Worker入口在构造时注入（来自配置，进程启动时解析一次），
/// 每个任务spawn一个独立子进程，通过stdin投递任务、从stdout
/// 收取完成消息。等待期间挂起的是调用方的逻辑任务，线程照常
/// 服务其他请求。
pub struct ProcessIngestionDispatcher {
    config: WorkerConfig,
}

impl ProcessIngestionDispatcher {
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }

    /// 取stdout的最后一行非空输出作为完成消息
    fn parse_message(stdout: &[u8]) -> Option<WorkerMessage> {
        let text = String::from_utf8_lossy(stdout);
        text.lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .and_then(|line| serde_json::from_str(line.trim()).ok())
    }
}

#[async_trait]
impl IngestionDispatcher for ProcessIngestionDispatcher {
    #[instrument(skip(self, payload))]
    async fn process_ingestion(&self, payload: VitalsPayload) -> Result<IngestionOutcome> {
        let job = WorkerJob {
            job_id: Uuid::new_v4(),
            vitals: payload.vitals,
            rounds: self.config.transform_rounds,
        };
        let start = Instant::now();

        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| DosebankError::Internal(format!("启动Worker失败: {e}")))?;

        let encoded = serde_json::to_vec(&job)
            .map_err(|e| DosebankError::Serialization(format!("编码任务失败: {e}")))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| DosebankError::Internal("无法获取Worker stdin".to_string()))?;

        // 投递与等待在同一个期限内：若Worker卡死不读stdin，大载荷的
        // 写入会在管道缓冲写满后挂起，必须和wait一起受超时约束
        let exchange = async {
            stdin
                .write_all(&encoded)
                .await
                .map_err(|e| DosebankError::Internal(format!("投递任务失败: {e}")))?;
            // 关闭stdin，Worker读到EOF后开始计算
            drop(stdin);

            child
                .wait_with_output()
                .await
                .map_err(|e| DosebankError::Internal(format!("等待Worker结束失败: {e}")))
        };

        let deadline = Duration::from_secs(self.config.timeout_seconds);
        let output = match tokio::time::timeout(deadline, exchange).await {
            Ok(waited) => waited?,
            Err(_) => {
                // kill_on_drop回收子进程，调用方拿到确定的超时结局
                warn!(
                    "Worker超时: job_id={}, 超过{}秒未响应",
                    job.job_id, self.config.timeout_seconds
                );
                return Err(DosebankError::WorkerTimeout {
                    seconds: self.config.timeout_seconds,
                });
            }
        };

        if !output.status.success() {
            let code = output.status.code();
            warn!("Worker异常终止: job_id={}, 退出码={:?}", job.job_id, code);
            return Err(DosebankError::WorkerCrashed { code });
        }

        let message = Self::parse_message(&output.stdout).ok_or_else(|| {
            DosebankError::Internal("Worker退出但未返回有效的完成消息".to_string())
        })?;

        match message {
            WorkerMessage {
                success: true,
                result: Some(result),
                ..
            } => {
                info!(
                    "摄取处理完成: job_id={}, 耗时={:?}",
                    job.job_id,
                    start.elapsed()
                );
                Ok(IngestionOutcome {
                    job_id: job.job_id,
                    result,
                })
            }
            WorkerMessage { success: true, .. } => Err(DosebankError::Internal(
                "Worker成功消息缺少result字段".to_string(),
            )),
            WorkerMessage { error, .. } => {
                let reason = error.unwrap_or_else(|| "未知原因".to_string());
                warn!("Worker报告计算失败: job_id={}, 原因={}", job.job_id, reason);
                Err(DosebankError::ComputeFailed(reason))
            }
        }
    }
}
