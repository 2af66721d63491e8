// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 探测目标
///
/// 整个运行期间不可变的基础URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    base_url: String,
}

impl Target {
    /// 创建新的探测目标
    ///
    /// 基础URL按原样保存，不做任何规范化处理
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// 根据单词构建候选URL
    ///
    /// 结果为 `base_url + "/" + word`，不转义、不去重、不合并斜杠。
    /// 空单词得到 `base_url + "/"`。
    ///
    /// # 参数
    ///
    /// * `word` - 字典中的一个条目
    ///
    /// # 返回值
    ///
    /// 返回候选URL
    pub fn resolve(&self, word: &str) -> String {
        let mut url = String::with_capacity(self.base_url.len() + 1 + word.len());
        url.push_str(&self.base_url);
        url.push('/');
        url.push_str(word);
        url
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base_url)
    }
}
