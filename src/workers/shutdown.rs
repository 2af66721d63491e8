// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tokio::sync::watch;

/// 运行阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// 正常派发任务
    Running,
    /// 停止派发新任务，进行中的请求继续执行
    Draining,
    /// 中止进行中的请求
    Aborted,
}

/// 创建一对关闭控制器和句柄
pub fn channel() -> (ShutdownController, ShutdownHandle) {
    let (tx, rx) = watch::channel(RunPhase::Running);
    (ShutdownController { tx }, ShutdownHandle { rx })
}

/// 关闭控制器
///
/// 由工作池持有，阶段只会向前推进
#[derive(Debug)]
pub struct ShutdownController {
    tx: watch::Sender<RunPhase>,
}

impl ShutdownController {
    /// 进入排空阶段
    pub fn drain(&self) {
        self.tx.send_if_modified(|phase| {
            if *phase == RunPhase::Running {
                *phase = RunPhase::Draining;
                true
            } else {
                false
            }
        });
    }

    /// 进入中止阶段
    pub fn abort(&self) {
        self.tx.send_replace(RunPhase::Aborted);
    }
}

/// 关闭句柄
///
/// 每个工作器持有一份
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    rx: watch::Receiver<RunPhase>,
}

impl ShutdownHandle {
    pub fn phase(&self) -> RunPhase {
        *self.rx.borrow()
    }

    /// 是否仍可派发新任务
    pub fn is_running(&self) -> bool {
        self.phase() == RunPhase::Running
    }

    /// 等待进入中止阶段
    ///
    /// 控制器被释放且从未中止时永远挂起
    pub async fn aborted(&mut self) {
        if self
            .rx
            .wait_for(|phase| *phase == RunPhase::Aborted)
            .await
            .is_err()
        {
            std::future::pending::<()>().await;
        }
    }
}
