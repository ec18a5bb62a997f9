//! # Dosebank Worker
//!
//! 计算卸载：CPU密集型的体征封装变换在独立的Worker子进程中执行，
//! 请求服务线程只负责派发任务并异步等待完成信号。
//!
//! 三个组成部分：
//! - [`transform`]：变换本身（纯函数，无I/O）
//! - [`protocol`]：调度器与Worker进程之间的stdin/stdout线协议
//! - [`dispatcher`]：spawn子进程、投递任务、限时等待并映射结局

pub mod dispatcher;
pub mod protocol;
pub mod transform;

pub use dispatcher::ProcessIngestionDispatcher;
pub use protocol::{WorkerJob, WorkerMessage};
