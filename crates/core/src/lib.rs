//! # Dosebank Core
//!
//! 剂量预约系统的核心抽象层：错误类型、领域模型、服务trait和配置。
//! 此crate不做任何I/O，持久化与进程管理由infrastructure和worker crate实现。

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use errors::{DosebankError, Result};
pub use models::{
    IngestionOutcome, InventoryItem, Reservation, ReservationStatus, VitalsPayload,
};
pub use traits::{IngestionDispatcher, ReservationCoordinator};
