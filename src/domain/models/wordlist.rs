// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 候选单词字典
///
/// 加载一次后不可变，保留原始顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wordlist {
    words: Vec<String>,
}

impl Wordlist {
    /// 从单词列表创建字典
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// 从文本内容解析字典
    ///
    /// 每行一个单词，仅去除行尾的换行符（`\n` 或 `\r\n`），
    /// 空行保留为空单词。
    pub fn from_text(text: &str) -> Self {
        Self {
            words: text.lines().map(str::to_owned).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Wordlist {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

impl FromIterator<String> for Wordlist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
