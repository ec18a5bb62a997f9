//! # Dosebank Infrastructure
//!
//! 持久化层实现：数据库连接池管理、表结构初始化，以及预约协调器的
//! PostgreSQL和SQLite两套实现。协调器是整个系统的核心，它把
//! 加锁读取、不变式校验、扣减和追加预约记录作为一个原子事务执行。

pub mod database;

pub use database::{DatabaseManager, DatabasePool, DatabaseType};
