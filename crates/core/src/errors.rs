use thiserror::Error;

/// 服务统一错误类型定义
///
/// 业务级错误（`InventoryNotFound`、`OutOfStock`）与系统级错误
/// （数据库、Worker相关）区分开，API层据此映射为不同的响应状态。
#[derive(Debug, Error)]
pub enum DosebankError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("库存条目未找到: {item}")]
    InventoryNotFound { item: String },

    #[error("库存不足: {item}")]
    OutOfStock { item: String },

    #[error("Worker报告计算失败: {0}")]
    ComputeFailed(String),

    #[error("Worker异常终止, 退出码: {code:?}")]
    WorkerCrashed { code: Option<i32> },

    #[error("Worker在{seconds}秒内未返回结果")]
    WorkerTimeout { seconds: u64 },

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl DosebankError {
    /// 业务级错误是预期情况，不代表系统故障
    pub fn is_business_error(&self) -> bool {
        matches!(
            self,
            DosebankError::InventoryNotFound { .. } | DosebankError::OutOfStock { .. }
        )
    }
}

/// 统一的Result类型
pub type Result<T> = std::result::Result<T, DosebankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_error_classification() {
        assert!(DosebankError::OutOfStock {
            item: "Pfizer-Batch-A".to_string()
        }
        .is_business_error());
        assert!(DosebankError::InventoryNotFound {
            item: "Pfizer-Batch-A".to_string()
        }
        .is_business_error());
        assert!(!DosebankError::WorkerCrashed { code: Some(1) }.is_business_error());
        assert!(!DosebankError::Internal("boom".to_string()).is_business_error());
    }

    #[test]
    fn test_worker_crashed_display() {
        let err = DosebankError::WorkerCrashed { code: Some(1) };
        assert!(format!("{err}").contains("1"));
    }
}
