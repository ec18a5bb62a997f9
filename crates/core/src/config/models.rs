use serde::{Deserialize, Serialize};

/// 应用总配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub reservation: ReservationConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
}

impl AppConfig {
    /// 校验全部配置段
    pub fn validate(&self) -> anyhow::Result<()> {
        self.database.validate()?;
        self.api.validate()?;
        self.reservation.validate()?;
        self.worker.validate()?;
        Ok(())
    }
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:dosebank.db".to_string(),
            max_connections: 10,
            min_connections: 1,
            connection_timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.url.is_empty() {
            return Err(anyhow::anyhow!("数据库URL不能为空"));
        }
        if self.max_connections == 0 {
            return Err(anyhow::anyhow!("最大连接数必须大于0"));
        }
        if self.min_connections > self.max_connections {
            return Err(anyhow::anyhow!("最小连接数不能大于最大连接数"));
        }
        if self.connection_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("连接超时时间必须大于0"));
        }
        Ok(())
    }
}

/// API服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub bind_address: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_address.is_empty() {
            return Err(anyhow::anyhow!("API监听地址不能为空"));
        }
        self.bind_address
            .parse::<std::net::SocketAddr>()
            .map_err(|e| anyhow::anyhow!("API监听地址格式无效: {e}"))?;
        Ok(())
    }
}

/// 预约协调配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationConfig {
    /// 本部署跟踪的唯一物品标识
    pub item_name: String,
    /// 库存不足时是否追加REJECTED审计记录
    pub log_rejected_attempts: bool,
    /// 启动时台账行不存在则以该值建行；已有行永不覆盖
    pub initial_stock: Option<i64>,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            item_name: "Pfizer-Batch-A".to_string(),
            log_rejected_attempts: false,
            initial_stock: None,
        }
    }
}

impl ReservationConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.item_name.is_empty() {
            return Err(anyhow::anyhow!("跟踪物品名称不能为空"));
        }
        if let Some(stock) = self.initial_stock {
            if stock < 0 {
                return Err(anyhow::anyhow!("初始库存不能为负数"));
            }
        }
        Ok(())
    }
}

/// 计算Worker配置
///
/// Worker入口在进程启动时显式注入，不依赖任何模块相对路径。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Worker可执行文件路径
    pub program: String,
    /// 传给Worker的附加参数
    #[serde(default)]
    pub args: Vec<String>,
    /// 等待Worker完成信号的最长时间，超时按异常终止处理
    pub timeout_seconds: u64,
    /// 变换的混淆轮数，轮数越高CPU开销越大
    pub transform_rounds: u32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            program: "dosebank-worker".to_string(),
            args: Vec::new(),
            timeout_seconds: 30,
            transform_rounds: 200_000,
        }
    }
}

impl WorkerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.program.is_empty() {
            return Err(anyhow::anyhow!("Worker可执行文件路径不能为空"));
        }
        if self.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("Worker超时时间必须大于0"));
        }
        if self.transform_rounds == 0 {
            return Err(anyhow::anyhow!("变换轮数必须大于0"));
        }
        Ok(())
    }
}
