// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::outcome::{Outcome, TransportErrorKind, TransportFailure};

/// 代理认证失败状态码
const PROXY_AUTHENTICATION_REQUIRED: u16 = 407;

/// 对单次探测结果进行分类
///
/// 纯函数：相同输入总是得到相同类别，永不失败
///
/// | 输入 | 结果 |
/// |---|---|
/// | 200 | `Success` |
/// | >= 400 | `Suppressed` |
/// | 其他状态码 | `Informational` |
/// | 传输失败 | `TransportError` |
///
/// 经由代理收到的 407 视为代理认证失败，归类为 `TransportError`。
///
/// # 参数
///
/// * `url` - 候选URL
/// * `result` - 响应状态码或传输失败
/// * `via_proxy` - 本次请求是否经过代理
///
/// # 返回值
///
/// 分类后的结果
pub fn classify(url: String, result: Result<u16, TransportFailure>, via_proxy: bool) -> Outcome {
    match result {
        Ok(PROXY_AUTHENTICATION_REQUIRED) if via_proxy => Outcome::TransportError {
            url,
            failure: TransportFailure::new(
                TransportErrorKind::Proxy,
                "proxy authentication required (407)",
            ),
        },
        Ok(200) => Outcome::Success { status: 200, url },
        Ok(status) if status >= 400 => Outcome::Suppressed { status, url },
        Ok(status) => Outcome::Informational { status, url },
        Err(failure) => Outcome::TransportError { url, failure },
    }
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
