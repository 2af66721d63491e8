// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::ProbeEngine;
use crate::queue::job_queue::{InMemoryJobQueue, JobQueue};
use crate::workers::context::RunContext;
use crate::workers::probe_worker::ProbeWorker;
use crate::workers::shutdown;
use crate::workers::stats::{RunStats, RunSummary};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn, Instrument};

/// 宽限期计时器未启动时的占位时长
const IDLE_TIMER: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// 工作池
///
/// 启动 `min(C, 字典长度)` 个固定的工作器，运行期间不再新建工作器。
/// 所有工作器退出后运行结束。
pub struct WorkerPool {
    context: RunContext,
    engine: Arc<dyn ProbeEngine>,
    stats: Arc<RunStats>,
}

impl WorkerPool {
    /// 创建新的工作池
    ///
    /// # 参数
    ///
    /// * `context` - 运行上下文
    /// * `engine` - 探测引擎
    pub fn new(context: RunContext, engine: Arc<dyn ProbeEngine>) -> Self {
        Self {
            context,
            engine,
            stats: Arc::new(RunStats::default()),
        }
    }

    /// 运行统计，可在运行过程中读取
    pub fn stats(&self) -> Arc<RunStats> {
        self.stats.clone()
    }

    /// 运行到所有任务完成
    pub async fn run(self) -> RunSummary {
        self.run_until(std::future::pending::<()>()).await
    }

    /// 运行到所有任务完成或收到停止信号
    ///
    /// 停止信号触发后不再派发新任务；宽限期结束后中止进行中的请求，
    /// 被中止的任务以 `Cancelled` 传输错误报告。
    ///
    /// # 参数
    ///
    /// * `stop` - 停止信号（如 Ctrl-C 或截止时间）
    ///
    /// # 返回值
    ///
    /// 运行摘要
    pub async fn run_until<F>(self, stop: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        let queue = Arc::new(InMemoryJobQueue::seed(&self.context.wordlist));
        let worker_count = self.context.worker_count();
        info!(
            target_url = %self.context.target,
            jobs = queue.total(),
            workers = worker_count,
            proxies = self.context.selector.pool().len(),
            strategy = self.context.selector.strategy_name(),
            engine = self.engine.name(),
            "Starting workers"
        );

        let (controller, handle) = shutdown::channel();
        let target = Arc::new(self.context.target.clone());
        let mut workers = JoinSet::new();
        for id in 0..worker_count {
            let worker = ProbeWorker::new(
                id,
                target.clone(),
                queue.clone(),
                self.engine.clone(),
                self.context.selector.clone(),
                self.context.reporter.clone(),
                self.stats.clone(),
            );
            // Workers run inside the caller's span
            workers.spawn(worker.run(handle.clone()).in_current_span());
        }
        drop(handle);

        let grace = sleep(IDLE_TIMER);
        tokio::pin!(grace);
        tokio::pin!(stop);
        let mut cancelled = false;
        let mut aborted = false;

        loop {
            tokio::select! {
                joined = workers.join_next() => match joined {
                    None => break,
                    Some(Ok(processed)) => debug!(processed, "Worker exited"),
                    // A crashed worker leaves its remaining jobs to the others
                    Some(Err(e)) => error!(error = %e, "Worker task failed"),
                },
                _ = &mut stop, if !cancelled => {
                    cancelled = true;
                    queue.close();
                    controller.drain();
                    warn!(
                        grace_period_secs = self.context.grace_period.as_secs_f64(),
                        in_flight = self.stats.in_flight(),
                        "Stop requested, no new jobs will be dispatched"
                    );
                    grace.as_mut().reset(Instant::now() + self.context.grace_period);
                },
                _ = &mut grace, if cancelled && !aborted => {
                    aborted = true;
                    controller.abort();
                    warn!(
                        in_flight = self.stats.in_flight(),
                        "Grace period elapsed, aborting in-flight requests"
                    );
                },
            }
        }

        let summary = self.stats.summary(queue.remaining(), cancelled);
        info!(
            dispatched = summary.dispatched,
            success = summary.success,
            suppressed = summary.suppressed,
            informational = summary.informational,
            transport_errors = summary.transport_errors,
            peak_in_flight = summary.peak_in_flight,
            undispatched = summary.undispatched,
            cancelled = summary.cancelled,
            "Run finished"
        );
        summary
    }
}
