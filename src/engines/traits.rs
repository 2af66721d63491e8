// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::outcome::{TransportErrorKind, TransportFailure};
use crate::domain::models::proxy::ProxyEndpoint;
use async_trait::async_trait;
use std::error::Error as StdError;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 连接失败
    #[error("Connection failed: {0}")]
    Connect(String),
    /// 代理配置无效
    #[error("Invalid proxy {proxy}: {reason}")]
    InvalidProxy { proxy: String, reason: String },
    /// 请求头无效
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
    /// 超时
    #[error("Timeout")]
    Timeout,
}

impl EngineError {
    /// 转换为传输层失败
    ///
    /// 经由代理时的连接失败归为代理失败
    ///
    /// # 参数
    ///
    /// * `via_proxy` - 请求是否经过代理
    pub fn into_failure(self, via_proxy: bool) -> TransportFailure {
        let kind = match &self {
            EngineError::RequestFailed(e) if e.is_timeout() => TransportErrorKind::Timeout,
            EngineError::RequestFailed(e) if e.is_connect() && via_proxy => {
                TransportErrorKind::Proxy
            }
            EngineError::RequestFailed(e) if e.is_connect() => TransportErrorKind::Connect,
            EngineError::RequestFailed(_) => TransportErrorKind::Request,
            EngineError::Connect(_) if via_proxy => TransportErrorKind::Proxy,
            EngineError::Connect(_) => TransportErrorKind::Connect,
            EngineError::InvalidProxy { .. } => TransportErrorKind::Proxy,
            EngineError::InvalidHeader { .. } => TransportErrorKind::Request,
            EngineError::Timeout => TransportErrorKind::Timeout,
        };
        TransportFailure::new(kind, error_chain(&self))
    }
}

/// 拼接完整的错误原因链
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // Wrapping variants often repeat their source in their own message
        if !chain.ends_with(&text) {
            chain.push_str(": ");
            chain.push_str(&text);
        }
        source = cause.source();
    }
    chain
}

/// 探测请求
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    /// 候选URL
    pub url: String,
    /// 代理，为空表示直连
    pub proxy: Option<ProxyEndpoint>,
}

/// 探测响应
///
/// 只关心状态码，不读取响应体
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

/// 探测引擎特质
///
/// 对一个候选URL发出一次GET请求，不重试
#[async_trait]
pub trait ProbeEngine: Send + Sync {
    /// 执行探测
    async fn probe(&self, request: &ProbeRequest) -> Result<ProbeResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
