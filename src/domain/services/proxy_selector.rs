// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::proxy::{ProxyCredentials, ProxyEndpoint, ProxyPool};
use rand::seq::IndexedRandom;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 代理选择策略
///
/// 从代理池中为一次请求挑选一个端点，实现必须可以被多个工作器并发调用
pub trait SelectionStrategy: Send + Sync {
    /// 从端点列表中选出一个，列表为空时返回 `None`
    fn pick<'a>(&self, endpoints: &'a [ProxyEndpoint]) -> Option<&'a ProxyEndpoint>;

    /// 策略名称
    fn name(&self) -> &'static str;
}

/// 均匀随机选择（有放回）
///
/// 各次选择相互独立，不保存任何状态
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelection;

impl SelectionStrategy for RandomSelection {
    fn pick<'a>(&self, endpoints: &'a [ProxyEndpoint]) -> Option<&'a ProxyEndpoint> {
        endpoints.choose(&mut rand::rng())
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// 轮询选择
#[derive(Debug, Default)]
pub struct RoundRobinSelection {
    cursor: AtomicUsize,
}

impl SelectionStrategy for RoundRobinSelection {
    fn pick<'a>(&self, endpoints: &'a [ProxyEndpoint]) -> Option<&'a ProxyEndpoint> {
        if endpoints.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % endpoints.len();
        endpoints.get(index)
    }

    fn name(&self) -> &'static str {
        "round_robin"
    }
}

/// 可配置的选择策略类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategyKind {
    /// 随机（默认）
    #[default]
    Random,
    /// 轮询
    RoundRobin,
}

impl SelectionStrategyKind {
    /// 构建对应的策略实例
    pub fn build(self) -> Arc<dyn SelectionStrategy> {
        match self {
            SelectionStrategyKind::Random => Arc::new(RandomSelection),
            SelectionStrategyKind::RoundRobin => Arc::new(RoundRobinSelection::default()),
        }
    }
}

impl FromStr for SelectionStrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "random" => Ok(SelectionStrategyKind::Random),
            "round_robin" => Ok(SelectionStrategyKind::RoundRobin),
            other => Err(format!(
                "unknown proxy strategy '{}', expected 'random' or 'round_robin'",
                other
            )),
        }
    }
}

/// 代理选择器
///
/// 持有只读的代理池、可选的全局认证信息和选择策略。
/// 代理池为空时所有任务都直连。
#[derive(Clone)]
pub struct ProxySelector {
    pool: Arc<ProxyPool>,
    credentials: Option<ProxyCredentials>,
    strategy: Arc<dyn SelectionStrategy>,
}

impl ProxySelector {
    /// 创建新的代理选择器
    ///
    /// # 参数
    ///
    /// * `pool` - 代理池
    /// * `credentials` - 全局代理认证信息，附加到没有内嵌认证信息的端点上
    /// * `strategy` - 选择策略
    pub fn new(
        pool: Arc<ProxyPool>,
        credentials: Option<ProxyCredentials>,
        strategy: Arc<dyn SelectionStrategy>,
    ) -> Self {
        Self {
            pool,
            credentials,
            strategy,
        }
    }

    /// 不使用代理的选择器
    pub fn direct() -> Self {
        Self::new(Arc::new(ProxyPool::default()), None, Arc::new(RandomSelection))
    }

    /// 为一个任务选择代理
    ///
    /// # 返回值
    ///
    /// * `Some(ProxyEndpoint)` - 选中的代理（已附加全局认证信息）
    /// * `None` - 直连
    pub fn select(&self) -> Option<ProxyEndpoint> {
        self.strategy
            .pick(self.pool.endpoints())
            .cloned()
            .map(|endpoint| endpoint.with_fallback_credentials(self.credentials.as_ref()))
    }

    pub fn pool(&self) -> &ProxyPool {
        &self.pool
    }

    pub fn is_direct(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}

impl std::fmt::Debug for ProxySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxySelector")
            .field("pool_size", &self.pool.len())
            .field("credentials", &self.credentials)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
