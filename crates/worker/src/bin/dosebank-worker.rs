//! 计算Worker进程入口
//!
//! 从stdin读取一个JSON任务，执行一次封装变换，向stdout写出唯一
//! 一条完成消息后以0退出。变换只执行一次，进程内不做重试。
//! 异常终止（panic、stdout写入失败）以非零码退出且不产生消息，
//! 由调度侧按崩溃处理。
//!
//! CPU密集、单任务、无并发，因此是同步入口，不挂异步运行时。

use std::io::{Read, Write};
use std::process::ExitCode;

use dosebank_worker::protocol::{WorkerJob, WorkerMessage};
use dosebank_worker::transform::seal_vitals;

fn run() -> Result<String, String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("读取任务失败: {e}"))?;

    let job: WorkerJob =
        serde_json::from_str(&input).map_err(|e| format!("解析任务失败: {e}"))?;

    let payload =
        serde_json::to_vec(&job.vitals).map_err(|e| format!("序列化载荷失败: {e}"))?;

    Ok(seal_vitals(&payload, job.rounds))
}

fn main() -> ExitCode {
    let message = match run() {
        Ok(result) => WorkerMessage::success(result),
        Err(error) => WorkerMessage::failure(error),
    };

    let mut stdout = std::io::stdout();
    if serde_json::to_writer(&mut stdout, &message).is_err() || writeln!(stdout).is_err() {
        // 消息无法送达，只能以异常终止收场
        return ExitCode::from(2);
    }
    ExitCode::SUCCESS
}
