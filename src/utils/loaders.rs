// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::proxy::{ProxyEndpoint, ProxyParseError, ProxyPool};
use crate::domain::models::wordlist::Wordlist;
use crate::utils::errors::StartupError;
use std::path::Path;

/// 读取字典文件
///
/// 非UTF-8内容按有损方式解码
pub async fn read_wordlist(path: &Path) -> Result<Wordlist, StartupError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| StartupError::Wordlist {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Wordlist::from_text(&String::from_utf8_lossy(&bytes)))
}

/// 解析代理列表文本
///
/// 空行和以 `#` 开头的行会被跳过
///
/// # 返回值
///
/// * `Ok(ProxyPool)` - 解析成功
/// * `Err((usize, ProxyParseError))` - 出错的行号（从1开始）和原因
pub fn parse_proxy_list(text: &str) -> Result<ProxyPool, (usize, ProxyParseError)> {
    let mut endpoints = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        let endpoint = ProxyEndpoint::parse(entry).map_err(|e| (index + 1, e))?;
        endpoints.push(endpoint);
    }
    Ok(ProxyPool::new(endpoints))
}

/// 读取代理文件
pub async fn read_proxy_file(path: &Path) -> Result<ProxyPool, StartupError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StartupError::ProxyFile {
            path: path.to_path_buf(),
            source,
        })?;
    parse_proxy_list(&text).map_err(|(line, source)| StartupError::ProxyEntry {
        path: path.to_path_buf(),
        line,
        source,
    })
}
