//! 应用配置
//!
//! 配置来源按优先级合并：内置默认值 < TOML配置文件 < `DOSEBANK_`前缀
//! 环境变量（层级用`__`分隔，如`DOSEBANK_DATABASE__URL`）。

pub mod models;

pub use models::{
    ApiConfig, AppConfig, DatabaseConfig, ReservationConfig, WorkerConfig,
};

use ::config::{Config, Environment, File};

use crate::errors::{DosebankError, Result};

impl AppConfig {
    /// 加载并校验配置
    ///
    /// `config_path`为None时仅使用默认值和环境变量。
    pub fn load(config_path: Option<&str>) -> Result<AppConfig> {
        let defaults = Config::try_from(&AppConfig::default())
            .map_err(|e| DosebankError::Configuration(format!("构造默认配置失败: {e}")))?;

        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("DOSEBANK")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .map_err(|e| DosebankError::Configuration(format!("加载配置失败: {e}")))?
            .try_deserialize()
            .map_err(|e| DosebankError::Configuration(format!("解析配置失败: {e}")))?;

        config
            .validate()
            .map_err(|e| DosebankError::Configuration(e.to_string()))?;

        Ok(config)
    }
}
