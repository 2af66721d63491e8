// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 负责与外部输出的交互：
/// - 指标（metrics）：探测任务的计数和进行中任务数
/// - 报告器（reporter）：把分类结果写到控制台和日志
pub mod metrics;
pub mod reporter;
