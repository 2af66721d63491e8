// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::outcome::OutcomeCategory;
use metrics::{counter, describe_counter, describe_gauge, gauge};

/// 初始化指标描述
///
/// 只注册指标说明；没有安装记录器时所有指标操作都是空操作
pub fn init_metrics() {
    describe_counter!(
        "dirbust_jobs_dispatched_total",
        "Total number of probe jobs dispatched to workers"
    );
    describe_counter!(
        "dirbust_outcomes_total",
        "Total number of classified probe outcomes by category"
    );
    describe_gauge!(
        "dirbust_jobs_in_flight",
        "Number of probe requests currently in flight"
    );
}

/// 记录一次任务派发
pub fn record_dispatch(in_flight: usize) {
    counter!("dirbust_jobs_dispatched_total").increment(1);
    gauge!("dirbust_jobs_in_flight").set(in_flight as f64);
}

/// 记录一个分类结果
pub fn record_outcome(category: OutcomeCategory, in_flight: usize) {
    counter!("dirbust_outcomes_total", "category" => category.as_str()).increment(1);
    gauge!("dirbust_jobs_in_flight").set(in_flight as f64);
}
