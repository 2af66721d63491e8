// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供固定大小的工作池和探测工作器
/// 包括运行上下文、关闭流程和运行统计
pub mod context;
pub mod manager;
pub mod probe_worker;
pub mod shutdown;
pub mod stats;

pub use context::RunContext;
pub use manager::WorkerPool;
pub use stats::RunSummary;
