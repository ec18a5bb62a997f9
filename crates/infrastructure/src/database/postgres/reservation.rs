use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use dosebank_core::config::ReservationConfig;
use dosebank_core::models::{Reservation, ReservationStatus};
use dosebank_core::traits::ReservationCoordinator;
use dosebank_core::{DosebankError, Result};
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::{debug, instrument, warn};

/// PostgreSQL预约协调器
///
/// `SELECT ... FOR UPDATE`取得台账行的排他锁并持有到事务提交或回滚，
/// 阻塞其他同样带锁读取该行的事务。锁覆盖整个"读取、扣减、追加"序列，
/// 校验与写入之间没有间隙，两个并发调用方不可能都观察到`count = 1`
/// 并双双成功。
pub struct PostgresReservationCoordinator {
    pool: PgPool,
    item_name: String,
    log_rejected_attempts: bool,
}

impl PostgresReservationCoordinator {
    pub fn new(pool: PgPool, config: &ReservationConfig) -> Self {
        Self {
            pool,
            item_name: config.item_name.clone(),
            log_rejected_attempts: config.log_rejected_attempts,
        }
    }

    fn row_to_reservation(row: &sqlx::postgres::PgRow) -> Result<Reservation> {
        let status_str: String = row.try_get("status")?;
        Ok(Reservation {
            id: row.try_get("id")?,
            patient_id: row.try_get("patient_id")?,
            status: ReservationStatus::from_str(&status_str)?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    async fn insert_reservation(
        tx: &mut Transaction<'_, Postgres>,
        patient_id: &str,
        status: ReservationStatus,
    ) -> Result<Reservation> {
        let row = sqlx::query(
            r#"
            INSERT INTO reservations (patient_id, status, timestamp)
            VALUES ($1, $2, $3)
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

    /// 库存不足分支：按配置决定是否留下REJECTED审计记录
    async fn reject_out_of_stock(
        &self,
        mut tx: Transaction<'_, Postgres>,
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
impl ReservationCoordinator for PostgresReservationCoordinator {
    #[instrument(skip(self))]
    async fn current_stock(&self) -> Result<i64> {
        let row = sqlx::query("SELECT count FROM inventory WHERE item_name = $1")
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
        // 作用域事务：任何错误路径上guard被丢弃即回滚，不会留下
        // 悬挂的事务或未释放的锁
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT count FROM inventory WHERE item_name = $1 FOR UPDATE")
            .bind(&self.item_name)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Err(DosebankError::InventoryNotFound {
                item: self.item_name.clone(),
            });
        };

        let count: i64 = row.try_get("count")?;
        if count <= 0 {
            return self.reject_out_of_stock(tx, patient_id).await;
        }

        sqlx::query("UPDATE inventory SET count = count - 1 WHERE item_name = $1")
            .bind(&self.item_name)
            .execute(&mut *tx)
            .await?;

        let reservation =
            Self::insert_reservation(&mut tx, patient_id, ReservationStatus::Confirmed).await?;

        tx.commit().await?;

        debug!(
            "预约成功: patient_id={}, 剩余库存={}",
            patient_id,
            count - 1
        );
        Ok(reservation)
    }
}
