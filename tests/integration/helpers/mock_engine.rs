// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use dirbust::domain::models::proxy::ProxyEndpoint;
use dirbust::engines::traits::{EngineError, ProbeEngine, ProbeRequest, ProbeResponse};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// 模拟的响应行为
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// 返回状态码
    Status(u16),
    /// 连接被拒绝
    Refused,
    /// 超时失败
    TimedOut,
    /// 引擎内部panic
    Panic,
    /// 永不返回
    Hang,
}

/// 模拟探测引擎
///
/// 按URL返回预设行为，并记录并发数峰值和每次请求使用的代理
pub struct MockEngine {
    behaviors: HashMap<String, MockBehavior>,
    fallback: MockBehavior,
    latency: Duration,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    calls: Mutex<Vec<(String, Option<ProxyEndpoint>)>>,
}

impl MockEngine {
    pub fn new(fallback: MockBehavior) -> Self {
        Self {
            behaviors: HashMap::new(),
            fallback,
            latency: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, url: &str, behavior: MockBehavior) -> Self {
        self.behaviors.insert(url.to_string(), behavior);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<(String, Option<ProxyEndpoint>)> {
        self.calls.lock().clone()
    }
}

/// 离开作用域时减少进行中计数，被中止的请求也会执行
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProbeEngine for MockEngine {
    async fn probe(&self, request: &ProbeRequest) -> Result<ProbeResponse, EngineError> {
        self.calls
            .lock()
            .push((request.url.clone(), request.proxy.clone()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        } else {
            tokio::task::yield_now().await;
        }

        let behavior = self
            .behaviors
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone());

        match behavior {
            MockBehavior::Status(status_code) => Ok(ProbeResponse {
                status_code,
                response_time_ms: self.latency.as_millis() as u64,
            }),
            MockBehavior::TimedOut => Err(EngineError::Timeout),
            MockBehavior::Panic => panic!("mock engine exploded on {}", request.url),
            MockBehavior::Refused => Err(EngineError::Connect("connection refused".to_string())),
            MockBehavior::Hang => std::future::pending().await,
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
