// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::target::Target;
use crate::domain::models::wordlist::Wordlist;
use crate::domain::services::proxy_selector::ProxySelector;
use crate::infrastructure::reporter::Reporter;
use std::sync::Arc;
use std::time::Duration;

/// 默认并发工作器数量
pub const DEFAULT_CONCURRENCY: usize = 10;

/// 默认关闭宽限期
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// 运行上下文
///
/// 一次运行所需的全部输入，启动时构建一次并传给工作池
#[derive(Clone)]
pub struct RunContext {
    /// 探测目标
    pub target: Target,
    /// 候选单词字典
    pub wordlist: Wordlist,
    /// 代理选择器
    pub selector: ProxySelector,
    /// 并发上限
    pub concurrency: usize,
    /// 停止派发后等待进行中请求的时间
    pub grace_period: Duration,
    /// 结果报告器
    pub reporter: Arc<dyn Reporter>,
}

impl RunContext {
    /// 创建使用默认并发、直连的运行上下文
    pub fn new(target: Target, wordlist: Wordlist, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            target,
            wordlist,
            selector: ProxySelector::direct(),
            concurrency: DEFAULT_CONCURRENCY,
            grace_period: DEFAULT_GRACE_PERIOD,
            reporter,
        }
    }

    pub fn with_selector(mut self, selector: ProxySelector) -> Self {
        self.selector = selector;
        self
    }

    /// 设置并发上限，最小为1
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// 实际启动的工作器数量
    pub fn worker_count(&self) -> usize {
        self.concurrency.min(self.wordlist.len())
    }
}
