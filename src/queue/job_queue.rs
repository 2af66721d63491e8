// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::QueuedJob;
use crate::domain::models::wordlist::Wordlist;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// 任务队列特质
///
/// 出队操作必须互斥，每个任务只会被一个工作器取走
pub trait JobQueue: Send + Sync {
    /// 出队任务
    ///
    /// # 返回值
    ///
    /// * `Some(QueuedJob)` - 下一个任务
    /// * `None` - 队列已空或已关闭
    fn pop(&self) -> Option<QueuedJob>;

    /// 关闭队列
    ///
    /// 返回后不会再有任务出队，剩余任务保留在队列中计为未派发
    fn close(&self);

    /// 剩余任务数
    fn remaining(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

/// 内存FIFO任务队列
///
/// 启动时一次性为字典中的每个单词生成一个任务
#[derive(Debug, Default)]
pub struct InMemoryJobQueue {
    state: Mutex<QueueState>,
    total: usize,
}

#[derive(Debug, Default)]
struct QueueState {
    jobs: VecDeque<QueuedJob>,
    closed: bool,
}

impl InMemoryJobQueue {
    /// 用字典填充队列
    ///
    /// # 参数
    ///
    /// * `wordlist` - 候选单词字典
    ///
    /// # 返回值
    ///
    /// 返回包含每个单词一个任务的队列
    pub fn seed(wordlist: &Wordlist) -> Self {
        let jobs: VecDeque<QueuedJob> = wordlist
            .iter()
            .enumerate()
            .map(|(seq, word)| QueuedJob {
                seq,
                word: word.to_string(),
            })
            .collect();
        let total = jobs.len();

        Self {
            state: Mutex::new(QueueState {
                jobs,
                closed: false,
            }),
            total,
        }
    }

    /// 入队时的任务总数
    pub fn total(&self) -> usize {
        self.total
    }
}

impl JobQueue for InMemoryJobQueue {
    fn pop(&self) -> Option<QueuedJob> {
        let mut state = self.state.lock();
        if state.closed {
            return None;
        }
        state.jobs.pop_front()
    }

    fn close(&self) {
        self.state.lock().closed = true;
    }

    fn remaining(&self) -> usize {
        self.state.lock().jobs.len()
    }
}

impl<T: JobQueue + ?Sized> JobQueue for Arc<T> {
    fn pop(&self) -> Option<QueuedJob> {
        (**self).pop()
    }

    fn close(&self) {
        (**self).close()
    }

    fn remaining(&self) -> usize {
        (**self).remaining()
    }
}
