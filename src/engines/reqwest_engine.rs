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

use crate::config::settings::{HttpSettings, DEFAULT_USER_AGENT};
use crate::domain::models::proxy::ProxyEndpoint;
use crate::engines::traits::{EngineError, ProbeEngine, ProbeRequest, ProbeResponse};
use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// 引擎选项
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// User-Agent 请求头
    pub user_agent: String,
    /// 额外的固定请求头
    pub headers: HashMap<String, String>,
    /// 单个请求超时时间
    pub request_timeout: Option<Duration>,
    /// 是否跟随重定向
    pub follow_redirects: bool,
    /// 是否接受无效证书
    pub accept_invalid_certs: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: HashMap::new(),
            request_timeout: None,
            follow_redirects: false,
            accept_invalid_certs: false,
        }
    }
}

impl From<&HttpSettings> for EngineOptions {
    fn from(settings: &HttpSettings) -> Self {
        Self {
            user_agent: settings.user_agent.clone(),
            headers: settings.headers.clone(),
            request_timeout: settings.request_timeout(),
            follow_redirects: settings.follow_redirects,
            accept_invalid_certs: settings.accept_invalid_certs,
        }
    }
}

/// 探测引擎
///
/// 基于reqwest实现。直连请求共享一个客户端，
/// 每个不同的代理端点按需创建一个客户端并缓存。
pub struct ReqwestEngine {
    options: EngineOptions,
    headers: HeaderMap,
    direct: reqwest::Client,
    proxied: DashMap<ProxyEndpoint, reqwest::Client>,
}

impl ReqwestEngine {
    /// 创建新的探测引擎
    ///
    /// # 参数
    ///
    /// * `options` - 引擎选项
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 创建成功
    /// * `Err(EngineError)` - 请求头无效或客户端创建失败
    pub fn new(options: EngineOptions) -> Result<Self, EngineError> {
        let headers = build_headers(&options.headers)?;
        let direct = client_builder(&options, &headers).no_proxy().build()?;

        Ok(Self {
            options,
            headers,
            direct,
            proxied: DashMap::new(),
        })
    }

    /// 获取请求使用的客户端
    fn client_for(&self, proxy: Option<&ProxyEndpoint>) -> Result<reqwest::Client, EngineError> {
        let Some(endpoint) = proxy else {
            return Ok(self.direct.clone());
        };

        if let Some(client) = self.proxied.get(endpoint) {
            return Ok(client.clone());
        }

        let mut proxy = reqwest::Proxy::all(endpoint.url()).map_err(|e| {
            EngineError::InvalidProxy {
                proxy: endpoint.to_string(),
                reason: e.to_string(),
            }
        })?;
        if let Some(creds) = &endpoint.credentials {
            proxy = proxy.basic_auth(&creds.username, &creds.password);
        }

        let client = client_builder(&self.options, &self.headers)
            .proxy(proxy)
            .build()?;
        debug!(proxy = %endpoint, "Built client for proxy");

        Ok(self
            .proxied
            .entry(endpoint.clone())
            .or_insert(client)
            .clone())
    }

    /// 已缓存的代理客户端数量
    pub fn cached_proxy_clients(&self) -> usize {
        self.proxied.len()
    }
}

fn build_headers(extra: &HashMap<String, String>) -> Result<HeaderMap, EngineError> {
    let mut headers = HeaderMap::new();
    for (k, v) in extra {
        let name = HeaderName::from_bytes(k.as_bytes()).map_err(|e| EngineError::InvalidHeader {
            name: k.clone(),
            reason: e.to_string(),
        })?;
        let value = HeaderValue::from_str(v).map_err(|e| EngineError::InvalidHeader {
            name: k.clone(),
            reason: e.to_string(),
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}

fn client_builder(options: &EngineOptions, headers: &HeaderMap) -> reqwest::ClientBuilder {
    let mut builder = reqwest::Client::builder()
        .user_agent(options.user_agent.as_str())
        .default_headers(headers.clone())
        .danger_accept_invalid_certs(options.accept_invalid_certs)
        .redirect(if options.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        });

    if let Some(timeout) = options.request_timeout {
        builder = builder.timeout(timeout);
    }

    builder
}

#[async_trait]
impl ProbeEngine for ReqwestEngine {
    /// 执行一次GET探测
    ///
    /// 只读取状态码，响应体直接丢弃
    ///
    /// # 参数
    ///
    /// * `request` - 探测请求
    ///
    /// # 返回值
    ///
    /// * `Ok(ProbeResponse)` - 收到响应（任何状态码）
    /// * `Err(EngineError)` - 传输失败
    async fn probe(&self, request: &ProbeRequest) -> Result<ProbeResponse, EngineError> {
        let client = self.client_for(request.proxy.as_ref())?;

        let start = Instant::now();
        let response = client.get(&request.url).send().await?;
        let status_code = response.status().as_u16();

        Ok(ProbeResponse {
            status_code,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
