use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use dosebank_core::config::ReservationConfig;
use dosebank_core::models::{Reservation, ReservationStatus};
use dosebank_core::traits::ReservationCoordinator;
use dosebank_core::{DosebankError, Result};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use tracing::{debug, instrument, warn};

/// SQLite预约协调器
///
/// SQLite没有行级`FOR UPDATE`，排他性来自库级写锁：事务的第一条
/// 语句就是条件扣减，它立即取得写锁并持有到事务结束，竞争者在
/// busy超时内排队。若先做普通读取再升级为写锁，两个并发事务会
/// 互相持有共享锁等待升级而死锁，所以扣减必须放在最前面。
pub struct SqliteReservationCoordinator {
    pool: SqlitePool,
    item_name: String,
    log_rejected_attempts: bool,
}

impl SqliteReservationCoordinator {
    pub fn new(pool: SqlitePool, config: &ReservationConfig) -> Self {
        Self {
            pool,
            item_name: config.item_name.clone(),
            log_rejected_attempts: config.log_rejected_attempts,
        }
    }

    fn row_to_reservation(row: &sqlx::sqlite::SqliteRow) -> Result<Reservation> {
        let status_str: String = row.try_get("status")?;
        Ok(Reservation {
            id: row.try_get("id")?,
            patient_id: row.try_get("patient_id")?,
            status: ReservationStatus::from_str(&status_str)?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    async fn insert_reservation(
        tx: &mut Transaction<'_, Sqlite>,
        patient_id: &str,
        status: ReservationStatus,
    ) -> Result<Reservation> {
        let row = sqlx::query(
            r#"
            INSERT INTO reservations (patient_id, status, timestamp)
            VALUES (?1, ?2, ?3)
            RETURNING id, patient_id, status, timestamp
            "#,
        )
        .bind(patient_id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Self::row_to_reservation(&row)
    }

    async fn reject_out_of_stock(
        &self,
        mut tx: Transaction<'_, Sqlite>,
        patient_id: &str,
    ) -> Result<Reservation> {
        if self.log_rejected_attempts {
            Self::insert_reservation(&mut tx, patient_id, ReservationStatus::Rejected).await?;
            tx.commit().await?;
        } else {
            tx.rollback().await?;
        }
        warn!("库存不足，预约被拒绝: item={}, patient_id={}", self.item_name, patient_id);
        Err(DosebankError::OutOfStock {
            item: self.item_name.clone(),
        })
    }
}

#[async_trait]
impl ReservationCoordinator for SqliteReservationCoordinator {
    #[instrument(skip(self))]
    async fn current_stock(&self) -> Result<i64> {
        let row = sqlx::query("SELECT count FROM inventory WHERE item_name = ?1")
            .bind(&self.item_name)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row.try_get("count")?),
            None => Err(DosebankError::InventoryNotFound {
                item: self.item_name.clone(),
            }),
        }
    }

    #[instrument(skip(self), fields(item_name = %self.item_name))]
    async fn reserve_dose(&self, patient_id: &str) -> Result<Reservation> {
        let mut tx = self.pool.begin().await?;

        // 条件扣减是事务的第一条写语句：原子完成"校验 + 扣减"，
        // 并取得贯穿后续追加与提交的写锁
        let updated = sqlx::query(
            "UPDATE inventory SET count = count - 1 WHERE item_name = ?1 AND count > 0",
        )
        .bind(&self.item_name)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // 区分"物品不存在"与"库存为零"
            let row = sqlx::query("SELECT count FROM inventory WHERE item_name = ?1")
                .bind(&self.item_name)
                .fetch_optional(&mut *tx)
                .await?;

            return match row {
                None => {
                    tx.rollback().await?;
                    Err(DosebankError::InventoryNotFound {
                        item: self.item_name.clone(),
                    })
                }
                Some(_) => self.reject_out_of_stock(tx, patient_id).await,
            };
        }

        let reservation =
            Self::insert_reservation(&mut tx, patient_id, ReservationStatus::Confirmed).await?;

        tx.commit().await?;

        debug!("预约成功: patient_id={}", patient_id);
        Ok(reservation)
    }
}
