// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::outcome::Outcome;
use colored::Colorize;
use parking_lot::Mutex;
use std::io::{self, Write};
use tracing::{debug, error, info, warn};

/// 结果日志记录使用的 tracing target
///
/// 控制台诊断日志会屏蔽该 target，结果行只由报告器输出
pub const OUTCOME_TARGET: &str = "dirbust::outcome";

/// 结果报告器特质
///
/// 会被多个工作器并发调用，每条记录必须整体写出
pub trait Reporter: Send + Sync {
    /// 报告一个分类结果
    fn report(&self, outcome: &Outcome);
}

/// 控制台报告器
///
/// - `Success`：输出绿色结果行并写入日志
/// - `TransportError`：输出红色简短提示，完整原因只写入日志
/// - `Suppressed` / `Informational`：只写入日志
pub struct ConsoleReporter<W: Write + Send> {
    console: Mutex<W>,
    color: bool,
}

impl ConsoleReporter<io::Stdout> {
    /// 输出到标准输出的报告器
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(writer: W, color: bool) -> Self {
        Self {
            console: Mutex::new(writer),
            color,
        }
    }

    /// 取回底层输出
    pub fn into_inner(self) -> W {
        self.console.into_inner()
    }

    fn print(&self, line: String, success: bool) {
        let line = match (self.color, success) {
            (false, _) => line,
            (true, true) => line.green().to_string(),
            (true, false) => line.red().to_string(),
        };

        let mut console = self.console.lock();
        if let Err(e) = writeln!(console, "{}", line).and_then(|_| console.flush()) {
            warn!(error = %e, "Failed to write result line to console");
        }
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn report(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Success { status, url } => {
                info!(target: OUTCOME_TARGET, status, url = %url, "{} - {}", status, url);
                self.print(format!("{} - {}", status, url), true);
            }
            Outcome::Suppressed { status, url } => {
                debug!(target: OUTCOME_TARGET, status, url = %url, "{} - {}", status, url);
            }
            Outcome::Informational { status, url } => {
                info!(target: OUTCOME_TARGET, status, url = %url, "{} - {}", status, url);
            }
            Outcome::TransportError { url, failure } => {
                error!(
                    target: OUTCOME_TARGET,
                    url = %url,
                    kind = %failure.kind,
                    cause = %failure.cause,
                    "{} for {}",
                    failure.kind.label(),
                    url
                );
                self.print(format!("{} - {}", failure.kind.label(), url), false);
            }
        }
    }
}
