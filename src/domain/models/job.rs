// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::proxy::ProxyEndpoint;

/// 队列中等待派发的任务
///
/// 只保存单词本身，候选URL在派发时才生成
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedJob {
    /// 在字典中的序号
    pub seq: usize,
    /// 候选单词
    pub word: String,
}

/// 正在执行的探测任务
///
/// 只在一次请求期间存在
#[derive(Debug, Clone)]
pub struct Job {
    /// 在字典中的序号
    pub seq: usize,
    /// 候选URL
    pub candidate_url: String,
    /// 分配的代理，为空表示直连
    pub proxy: Option<ProxyEndpoint>,
}
