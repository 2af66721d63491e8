// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::borrow::Cow;
use std::fmt;
use thiserror::Error;
use url::Url;

/// 未指定协议时默认补全的前缀
pub const DEFAULT_PROXY_SCHEME: &str = "http://";

const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

/// 代理条目解析错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProxyParseError {
    /// 无法解析为URL
    #[error("invalid proxy url: {0}")]
    InvalidUrl(String),
    /// 不支持的协议
    #[error("unsupported proxy scheme: {0}")]
    UnsupportedScheme(String),
    /// 缺少主机
    #[error("proxy entry has no host")]
    MissingHost,
    /// 缺少端口且协议无默认端口
    #[error("proxy entry has no port")]
    MissingPort,
}

/// 代理认证信息
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ProxyCredentials {
    /// 用户名
    pub username: String,
    /// 密码
    pub password: String,
}

impl ProxyCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for ProxyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// 代理端点
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyEndpoint {
    /// 协议 (http, https, socks5, socks5h)
    pub scheme: String,
    /// 主机
    pub host: String,
    /// 端口
    pub port: u16,
    /// 内嵌的认证信息
    pub credentials: Option<ProxyCredentials>,
}

/// 为缺少协议前缀的代理条目补全 `http://`
///
/// 已带有 `scheme://` 前缀的条目保持不变，因此重复调用结果一致。
pub fn normalize_proxy_entry(entry: &str) -> Cow<'_, str> {
    if entry.contains("://") {
        Cow::Borrowed(entry)
    } else {
        Cow::Owned(format!("{}{}", DEFAULT_PROXY_SCHEME, entry))
    }
}

impl ProxyEndpoint {
    /// 解析单个代理条目
    ///
    /// 支持 `host:port`、`user:pass@host:port` 以及完整的代理URL
    ///
    /// # 参数
    ///
    /// * `entry` - 代理文件中的一行
    ///
    /// # 返回值
    ///
    /// * `Ok(ProxyEndpoint)` - 解析成功
    /// * `Err(ProxyParseError)` - 条目格式错误
    pub fn parse(entry: &str) -> Result<Self, ProxyParseError> {
        let normalized = normalize_proxy_entry(entry.trim());
        let url =
            Url::parse(&normalized).map_err(|e| ProxyParseError::InvalidUrl(e.to_string()))?;

        let scheme = url.scheme().to_ascii_lowercase();
        if !SUPPORTED_SCHEMES.contains(&scheme.as_str()) {
            return Err(ProxyParseError::UnsupportedScheme(scheme));
        }

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or(ProxyParseError::MissingHost)?
            .to_string();

        let port = match url.port_or_known_default() {
            Some(port) => port,
            None if scheme.starts_with("socks5") => 1080,
            None => return Err(ProxyParseError::MissingPort),
        };

        let credentials = if url.username().is_empty() {
            None
        } else {
            Some(ProxyCredentials::new(
                decode_component(url.username()),
                decode_component(url.password().unwrap_or("")),
            ))
        };

        Ok(Self {
            scheme,
            host,
            port,
            credentials,
        })
    }

    /// 不含认证信息的代理URL
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// 为缺少内嵌认证信息的端点附加全局认证信息
    ///
    /// 已有认证信息的端点保持不变
    pub fn with_fallback_credentials(mut self, fallback: Option<&ProxyCredentials>) -> Self {
        if self.credentials.is_none() {
            self.credentials = fallback.cloned();
        }
        self
    }
}

impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.credentials {
            Some(creds) => write!(
                f,
                "{}://{}:***@{}:{}",
                self.scheme, creds.username, self.host, self.port
            ),
            None => write!(f, "{}://{}:{}", self.scheme, self.host, self.port),
        }
    }
}

fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// 代理池
///
/// 仅在启用代理时非空，运行期间只读
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyPool {
    endpoints: Vec<ProxyEndpoint>,
}

impl ProxyPool {
    pub fn new(endpoints: Vec<ProxyEndpoint>) -> Self {
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &[ProxyEndpoint] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn contains(&self, endpoint: &ProxyEndpoint) -> bool {
        self.endpoints.contains(endpoint)
    }
}
