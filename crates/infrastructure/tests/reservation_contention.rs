//! 预约协调器的并发正确性测试
//!
//! 使用临时文件上的SQLite数据库（多个连接共享同一份数据，
//! 写事务通过busy等待排队），验证高争用下库存不变式成立。

use std::sync::Arc;

use dosebank_core::config::{DatabaseConfig, ReservationConfig};
use dosebank_core::models::{InventoryItem, ReservationStatus};
use dosebank_core::traits::ReservationCoordinator;
use dosebank_core::DosebankError;
use dosebank_infrastructure::database::DatabaseManager;
use futures::future::join_all;
use tempfile::TempDir;

const ITEM: &str = "Pfizer-Batch-A";

struct TestDb {
    manager: DatabaseManager,
    // 目录被回收时数据库文件一并删除
    _dir: TempDir,
}

async fn setup(initial_stock: i64, log_rejected: bool) -> (TestDb, Arc<dyn ReservationCoordinator>) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite:{}/dosebank.db", dir.path().display()),
        max_connections: 10,
        ..DatabaseConfig::default()
    };

    let manager = DatabaseManager::new(&config).await.unwrap();
    manager.ensure_schema().await.unwrap();
    manager.seed_initial_stock(ITEM, initial_stock).await.unwrap();

    let coordinator = manager.reservation_coordinator(&ReservationConfig {
        item_name: ITEM.to_string(),
        log_rejected_attempts: log_rejected,
        initial_stock: None,
    });

    (TestDb { manager, _dir: dir }, coordinator)
}

async fn setup_empty() -> (TestDb, Arc<dyn ReservationCoordinator>) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite:{}/dosebank.db", dir.path().display()),
        max_connections: 10,
        ..DatabaseConfig::default()
    };

    let manager = DatabaseManager::new(&config).await.unwrap();
    manager.ensure_schema().await.unwrap();

    let coordinator = manager.reservation_coordinator(&ReservationConfig::default());
    (TestDb { manager, _dir: dir }, coordinator)
}

#[tokio::test]
async fn test_single_reservation_decrements_once() {
    let (db, coordinator) = setup(3, false).await;

    let reservation = coordinator.reserve_dose("patient-1").await.unwrap();
    assert_eq!(reservation.status, ReservationStatus::Confirmed);
    assert_eq!(reservation.patient_id, "patient-1");
    assert!(reservation.id > 0);

    // 重新读取库存恰好反映一次扣减
    assert_eq!(coordinator.current_stock().await.unwrap(), 2);
    assert_eq!(
        db.manager.inventory(ITEM).await.unwrap(),
        Some(InventoryItem {
            item_name: ITEM.to_string(),
            count: 2,
        })
    );
    assert_eq!(db.manager.count_reservations("CONFIRMED").await.unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_item_yields_not_found_without_mutation() {
    let (db, coordinator) = setup_empty().await;

    let err = coordinator.reserve_dose("patient-1").await.unwrap_err();
    assert!(matches!(err, DosebankError::InventoryNotFound { .. }));

    let err = coordinator.current_stock().await.unwrap_err();
    assert!(matches!(err, DosebankError::InventoryNotFound { .. }));

    assert!(db.manager.inventory(ITEM).await.unwrap().is_none());

    // 无任何写入
    assert_eq!(db.manager.count_reservations("CONFIRMED").await.unwrap(), 0);
    assert_eq!(db.manager.count_reservations("REJECTED").await.unwrap(), 0);
}

#[tokio::test]
async fn test_out_of_stock_without_audit_logging() {
    let (db, coordinator) = setup(0, false).await;

    let err = coordinator.reserve_dose("patient-1").await.unwrap_err();
    assert!(matches!(err, DosebankError::OutOfStock { .. }));

    assert_eq!(coordinator.current_stock().await.unwrap(), 0);
    assert_eq!(db.manager.count_reservations("CONFIRMED").await.unwrap(), 0);
    assert_eq!(db.manager.count_reservations("REJECTED").await.unwrap(), 0);
}

#[tokio::test]
async fn test_out_of_stock_with_audit_logging() {
    let (db, coordinator) = setup(0, true).await;

    let err = coordinator.reserve_dose("patient-1").await.unwrap_err();
    assert!(matches!(err, DosebankError::OutOfStock { .. }));

    // 策略开启时留下恰好一条REJECTED审计记录
    assert_eq!(db.manager.count_reservations("REJECTED").await.unwrap(), 1);
    assert_eq!(db.manager.count_reservations("CONFIRMED").await.unwrap(), 0);
}

#[tokio::test]
async fn test_two_contenders_single_dose() {
    let (db, coordinator) = setup(1, false).await;

    let a = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move { coordinator.reserve_dose("A").await })
    };
    let b = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move { coordinator.reserve_dose("B").await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let out_of_stock = results
        .iter()
        .filter(|r| matches!(r, Err(DosebankError::OutOfStock { .. })))
        .count();

    // 恰好一人成功，另一人得到业务级拒绝
    assert_eq!(successes, 1);
    assert_eq!(out_of_stock, 1);
    assert_eq!(coordinator.current_stock().await.unwrap(), 0);
    assert_eq!(db.manager.count_reservations("CONFIRMED").await.unwrap(), 1);
}

#[tokio::test]
async fn test_fifty_contenders_racing_on_one_dose() {
    let (db, coordinator) = setup(1, false).await;

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.reserve_dose(&format!("patient-{i}")).await })
        })
        .collect();

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "恰好一次扣减，不允许丢失更新或双重扣减");

    for result in &results {
        if let Err(err) = result {
            assert!(
                matches!(err, DosebankError::OutOfStock { .. }),
                "失败者只能是库存不足: {err}"
            );
        }
    }

    assert_eq!(coordinator.current_stock().await.unwrap(), 0);
    assert_eq!(db.manager.count_reservations("CONFIRMED").await.unwrap(), 1);
}

#[tokio::test]
async fn test_concurrent_reservations_against_finite_stock() {
    const STOCK: i64 = 5;
    const CALLERS: usize = 20;

    let (db, coordinator) = setup(STOCK, false).await;

    let handles: Vec<_> = (0..CALLERS)
        .map(|i| {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.reserve_dose(&format!("patient-{i}")).await })
        })
        .collect();

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let rejections = results
        .iter()
        .filter(|r| matches!(r, Err(DosebankError::OutOfStock { .. })))
        .count();

    // N个并发请求对初始库存S：恰好min(N, S)个成功，其余全部库存不足
    assert_eq!(successes, STOCK as usize);
    assert_eq!(rejections, CALLERS - STOCK as usize);

    let final_stock = coordinator.current_stock().await.unwrap();
    assert_eq!(final_stock, 0);
    assert!(final_stock >= 0, "库存绝不为负");

    // CONFIRMED记录数不超过初始库存
    assert_eq!(
        db.manager.count_reservations("CONFIRMED").await.unwrap(),
        STOCK
    );
}

#[tokio::test]
async fn test_rejected_audit_under_contention() {
    const STOCK: i64 = 2;
    const CALLERS: usize = 6;

    let (db, coordinator) = setup(STOCK, true).await;

    let handles: Vec<_> = (0..CALLERS)
        .map(|i| {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.reserve_dose(&format!("patient-{i}")).await })
        })
        .collect();

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, STOCK as usize);

    assert_eq!(
        db.manager.count_reservations("CONFIRMED").await.unwrap(),
        STOCK
    );
    assert_eq!(
        db.manager.count_reservations("REJECTED").await.unwrap(),
        (CALLERS - STOCK as usize) as i64
    );
}
