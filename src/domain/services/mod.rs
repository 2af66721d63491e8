// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 结果分类（classifier）：把状态码或传输失败映射为结果类别
/// - 代理选择（proxy_selector）：按策略为每个任务挑选代理
pub mod classifier;
pub mod proxy_selector;
