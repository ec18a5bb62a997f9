use async_trait::async_trait;

use crate::errors::Result;
use crate::models::Reservation;

/// 预约协调器：对单一跟踪物品执行库存查询与原子预约
///
/// `reserve_dose`必须作为一个事务执行完整的"加锁读取 → 校验 → 扣减 →
/// 追加预约记录"序列，锁必须覆盖整个序列而不仅是读取，否则两个并发
/// 事务会在校验与写入之间交错并把库存扣成负数。
///
/// 实现要求持久化层提供：带排他行锁的读取、原子的提交/回滚、
/// 已提交写入的持久性。满足这三点的任何存储引擎都可以作为后端。
#[async_trait]
pub trait ReservationCoordinator: Send + Sync {
    /// 读取当前剩余库存（普通读，不加锁）
    async fn current_stock(&self) -> Result<i64>;

    /// 为一位患者原子地预约一剂
    ///
    /// 错误语义：
    /// - `InventoryNotFound`：跟踪物品不存在，无任何变更
    /// - `OutOfStock`：库存为零的业务级拒绝，不扣减（是否追加
    ///   `REJECTED`审计记录由配置决定）
    /// - `Database`：持久化/传输故障，事务已完整回滚
    async fn reserve_dose(&self, patient_id: &str) -> Result<Reservation>;
}
