use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DosebankError;

/// 预约记录
///
/// 只追加，写入后不可变。每条`CONFIRMED`记录与台账上恰好一次扣减一一对应。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub patient_id: String,
    pub status: ReservationStatus,
    pub timestamp: DateTime<Utc>,
}

/// 预约结果状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "REJECTED")]
    Rejected,
}

impl ReservationStatus {
    /// 数据库中的状态列取值
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = DosebankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "REJECTED" => Ok(ReservationStatus::Rejected),
            other => Err(DosebankError::Serialization(format!(
                "无效的预约状态: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
