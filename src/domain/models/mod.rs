// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 目标（target）：基础URL及候选URL的生成
/// - 字典（wordlist）：有序的候选单词
/// - 代理（proxy）：代理端点、认证信息和代理池
/// - 任务（job）：单次探测的执行单元
/// - 结果（outcome）：分类后的探测结果
pub mod job;
pub mod outcome;
pub mod proxy;
pub mod target;
pub mod wordlist;
