// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::{Job, QueuedJob};
use crate::domain::models::outcome::{Outcome, TransportErrorKind, TransportFailure};
use crate::domain::models::target::Target;
use crate::domain::services::classifier::classify;
use crate::domain::services::proxy_selector::ProxySelector;
use crate::engines::traits::{ProbeEngine, ProbeRequest};
use crate::infrastructure::metrics;
use crate::infrastructure::reporter::Reporter;
use crate::queue::job_queue::JobQueue;
use crate::workers::shutdown::ShutdownHandle;
use crate::workers::stats::RunStats;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, instrument};

/// 探测工作器
///
/// 循环从共享队列取任务，直到队列为空或运行被停止
pub struct ProbeWorker {
    id: usize,
    target: Arc<Target>,
    queue: Arc<dyn JobQueue>,
    engine: Arc<dyn ProbeEngine>,
    selector: ProxySelector,
    reporter: Arc<dyn Reporter>,
    stats: Arc<RunStats>,
}

impl ProbeWorker {
    /// 创建新的探测工作器实例
    pub fn new(
        id: usize,
        target: Arc<Target>,
        queue: Arc<dyn JobQueue>,
        engine: Arc<dyn ProbeEngine>,
        selector: ProxySelector,
        reporter: Arc<dyn Reporter>,
        stats: Arc<RunStats>,
    ) -> Self {
        Self {
            id,
            target,
            queue,
            engine,
            selector,
            reporter,
            stats,
        }
    }

    /// 运行探测工作器
    ///
    /// # 返回值
    ///
    /// 本工作器处理的任务数
    pub async fn run(self, mut shutdown: ShutdownHandle) -> usize {
        debug!(worker_id = self.id, "Probe worker started");

        let mut processed = 0;
        while shutdown.is_running() {
            // The pool closes the queue before draining, so a stop racing this pop still wins
            let Some(queued) = self.queue.pop() else {
                break;
            };

            let job = self.dispatch(queued);
            let in_flight = self.stats.job_started();
            metrics::record_dispatch(in_flight);

            let outcome = self.execute(&job, &mut shutdown).await;

            let category = outcome.category();
            let in_flight = self.stats.job_finished(category);
            metrics::record_outcome(category, in_flight);

            self.reporter.report(&outcome);
            processed += 1;
        }

        debug!(worker_id = self.id, processed, "Probe worker finished");
        processed
    }

    /// 生成候选URL并分配代理
    fn dispatch(&self, queued: QueuedJob) -> Job {
        Job {
            seq: queued.seq,
            candidate_url: self.target.resolve(&queued.word),
            proxy: self.selector.select(),
        }
    }

    /// 执行一次探测并分类
    ///
    /// 任何失败（包括引擎panic和关闭时的中止）都转换为 `TransportError`
    #[instrument(level = "debug", skip(self, job, shutdown), fields(worker_id = self.id, seq = job.seq, url = %job.candidate_url))]
    async fn execute(&self, job: &Job, shutdown: &mut ShutdownHandle) -> Outcome {
        let request = ProbeRequest {
            url: job.candidate_url.clone(),
            proxy: job.proxy.clone(),
        };
        let via_proxy = request.proxy.is_some();

        let attempt = AssertUnwindSafe(self.engine.probe(&request)).catch_unwind();

        let result = tokio::select! {
            result = attempt => match result {
                Ok(Ok(response)) => {
                    debug!(
                        status = response.status_code,
                        elapsed_ms = response.response_time_ms,
                        "Probe completed"
                    );
                    Ok(response.status_code)
                }
                Ok(Err(e)) => Err(e.into_failure(via_proxy)),
                Err(payload) => Err(TransportFailure::new(
                    TransportErrorKind::Internal,
                    panic_message(&*payload),
                )),
            },
            _ = shutdown.aborted() => Err(TransportFailure::new(
                TransportErrorKind::Cancelled,
                "request aborted during shutdown",
            )),
        };

        classify(job.candidate_url.clone(), result, via_proxy)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("probe panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("probe panicked: {}", message)
    } else {
        "probe panicked".to_string()
    }
}
