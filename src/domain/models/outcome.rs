// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 传输层失败类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// 连接失败（拒绝连接、DNS解析失败等）
    Connect,
    /// 超时
    Timeout,
    /// 代理失败（包括代理认证失败）
    Proxy,
    /// 请求构建或发送失败
    Request,
    /// 关闭过程中被中止
    Cancelled,
    /// 意外的内部错误
    Internal,
}

impl TransportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Proxy => "proxy",
            TransportErrorKind::Request => "request",
            TransportErrorKind::Cancelled => "cancelled",
            TransportErrorKind::Internal => "internal",
        }
    }

    /// 控制台输出使用的简短标签
    pub fn label(&self) -> &'static str {
        match self {
            TransportErrorKind::Connect => "Connection error",
            TransportErrorKind::Timeout => "Timeout",
            TransportErrorKind::Proxy => "Proxy error",
            TransportErrorKind::Request => "Request error",
            TransportErrorKind::Cancelled => "Cancelled",
            TransportErrorKind::Internal => "Internal error",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 传输层失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    /// 失败类型
    pub kind: TransportErrorKind,
    /// 完整的错误原因链
    pub cause: String,
}

impl TransportFailure {
    pub fn new(kind: TransportErrorKind, cause: impl Into<String>) -> Self {
        Self {
            kind,
            cause: cause.into(),
        }
    }
}

/// 探测结果类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeCategory {
    Success,
    Suppressed,
    Informational,
    TransportError,
}

impl OutcomeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeCategory::Success => "success",
            OutcomeCategory::Suppressed => "suppressed",
            OutcomeCategory::Informational => "informational",
            OutcomeCategory::TransportError => "transport_error",
        }
    }
}

/// 单次探测的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 状态码 200
    Success { status: u16, url: String },
    /// 4xx/5xx，视为路径不存在，不输出到控制台
    Suppressed { status: u16, url: String },
    /// 其他状态码（1xx、非200的2xx、3xx），仅记录日志
    Informational { status: u16, url: String },
    /// 连接或代理失败
    TransportError {
        url: String,
        failure: TransportFailure,
    },
}

impl Outcome {
    pub fn url(&self) -> &str {
        match self {
            Outcome::Success { url, .. }
            | Outcome::Suppressed { url, .. }
            | Outcome::Informational { url, .. }
            | Outcome::TransportError { url, .. } => url,
        }
    }

    pub fn category(&self) -> OutcomeCategory {
        match self {
            Outcome::Success { .. } => OutcomeCategory::Success,
            Outcome::Suppressed { .. } => OutcomeCategory::Suppressed,
            Outcome::Informational { .. } => OutcomeCategory::Informational,
            Outcome::TransportError { .. } => OutcomeCategory::TransportError,
        }
    }
}
