// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod mock_engine;

use dirbust::domain::models::target::Target;
use dirbust::domain::models::wordlist::Wordlist;
use dirbust::infrastructure::reporter::Reporter;
use dirbust::workers::RunContext;
use std::sync::Arc;

pub const BASE_URL: &str = "http://example.test";

/// 用给定单词构建运行上下文
pub fn context_for(words: &[&str], reporter: Arc<dyn Reporter>) -> RunContext {
    let wordlist: Wordlist = words.iter().map(|w| w.to_string()).collect();
    RunContext::new(Target::new(BASE_URL), wordlist, reporter)
}

/// 生成 `count` 个不同的单词
pub fn numbered_words(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("path{}", i)).collect()
}
