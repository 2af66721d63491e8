// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::outcome::OutcomeCategory;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 运行统计
///
/// 记录派发数、各类结果数以及进行中任务数的峰值
#[derive(Debug, Default)]
pub struct RunStats {
    dispatched: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    success: AtomicUsize,
    suppressed: AtomicUsize,
    informational: AtomicUsize,
    transport_errors: AtomicUsize,
}

impl RunStats {
    /// 记录任务开始，返回当前进行中的任务数
    pub fn job_started(&self) -> usize {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        now
    }

    /// 记录任务结束，返回当前进行中的任务数
    pub fn job_finished(&self, category: OutcomeCategory) -> usize {
        let counter = match category {
            OutcomeCategory::Success => &self.success,
            OutcomeCategory::Suppressed => &self.suppressed,
            OutcomeCategory::Informational => &self.informational,
            OutcomeCategory::TransportError => &self.transport_errors,
        };
        counter.fetch_add(1, Ordering::SeqCst);
        self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// 生成运行摘要
    pub fn summary(&self, undispatched: usize, cancelled: bool) -> RunSummary {
        RunSummary {
            dispatched: self.dispatched.load(Ordering::SeqCst),
            success: self.success.load(Ordering::SeqCst),
            suppressed: self.suppressed.load(Ordering::SeqCst),
            informational: self.informational.load(Ordering::SeqCst),
            transport_errors: self.transport_errors.load(Ordering::SeqCst),
            peak_in_flight: self.peak_in_flight(),
            undispatched,
            cancelled,
        }
    }
}

/// 运行摘要
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// 已派发任务数
    pub dispatched: usize,
    pub success: usize,
    pub suppressed: usize,
    pub informational: usize,
    pub transport_errors: usize,
    /// 同时进行中任务数的峰值
    pub peak_in_flight: usize,
    /// 因取消而未派发的任务数
    pub undispatched: usize,
    /// 是否被取消
    pub cancelled: bool,
}

impl RunSummary {
    /// 已产生结果的任务数
    pub fn completed(&self) -> usize {
        self.success + self.suppressed + self.informational + self.transport_errors
    }
}
