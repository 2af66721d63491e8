// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::proxy::ProxyParseError;
use crate::engines::traits::EngineError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 启动阶段错误类型
///
/// 都在派发任何任务之前发生，会终止整个运行
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    #[error("无效配置: {0}")]
    InvalidSetting(String),

    #[error("无法读取字典文件 {path}: {source}")]
    Wordlist { path: PathBuf, source: io::Error },

    #[error("无法读取代理文件 {path}: {source}")]
    ProxyFile { path: PathBuf, source: io::Error },

    #[error("代理文件 {path} 第 {line} 行无效: {source}")]
    ProxyEntry {
        path: PathBuf,
        line: usize,
        source: ProxyParseError,
    },

    #[error("无法打开日志文件 {path}: {source}")]
    LogFile { path: PathBuf, source: io::Error },

    #[error("日志初始化失败: {0}")]
    Telemetry(String),

    #[error("引擎初始化失败: {0}")]
    Engine(#[from] EngineError),
}
