// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::services::proxy_selector::SelectionStrategyKind;
use clap::Parser;
use std::path::PathBuf;

/// 命令行参数
///
/// 命令行上给出的选项覆盖配置文件和环境变量
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dirbust",
    version,
    about = "Directory buster. Supply a wordlist with -w and a target url"
)]
pub struct Cli {
    /// Base URL that candidate words are appended to
    pub url: String,

    /// Path of the word list file
    #[arg(short = 'w', long, value_name = "FILE")]
    pub wordlist: PathBuf,

    /// User-Agent header sent with every request
    #[arg(short = 'a', long = "user-agent", value_name = "UA")]
    pub user_agent: Option<String>,

    /// Proxy file, one `host:port` or `user:pass@host:port` entry per line
    #[arg(short = 'p', long = "proxy-file", value_name = "FILE")]
    pub proxy_file: Option<PathBuf>,

    /// Username applied to proxies without embedded credentials
    #[arg(long = "proxy-username", requires = "proxy_password")]
    pub proxy_username: Option<String>,

    /// Password applied to proxies without embedded credentials
    #[arg(long = "proxy-password", requires = "proxy_username")]
    pub proxy_password: Option<String>,

    /// Proxy selection strategy (random, round_robin)
    #[arg(long = "proxy-strategy", value_name = "STRATEGY")]
    pub proxy_strategy: Option<SelectionStrategyKind>,

    /// Maximum number of concurrent requests
    #[arg(short = 't', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Stop dispatching after this many seconds
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,

    /// Seconds in-flight requests may keep running after a stop
    #[arg(long = "grace-period", value_name = "SECS")]
    pub grace_period: Option<u64>,

    /// Log file, truncated at the start of every run
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Follow redirects instead of reporting 3xx statuses
    #[arg(long = "follow-redirects")]
    pub follow_redirects: bool,

    /// Disable colored console output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    /// 把命令行选项写入配置
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(user_agent) = &self.user_agent {
            settings.http.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.http.request_timeout_secs = Some(timeout);
        }
        if self.follow_redirects {
            settings.http.follow_redirects = true;
        }
        if let Some(threads) = self.threads {
            settings.concurrency.workers = threads;
        }
        if let Some(strategy) = self.proxy_strategy {
            settings.proxy.strategy = strategy;
        }
        if self.proxy_username.is_some() {
            settings.proxy.username = self.proxy_username.clone();
            settings.proxy.password = self.proxy_password.clone();
        }
        if let Some(deadline) = self.deadline {
            settings.shutdown.deadline_secs = Some(deadline);
        }
        if let Some(grace_period) = self.grace_period {
            settings.shutdown.grace_period_secs = grace_period;
        }
        if let Some(log_file) = &self.log_file {
            settings.logging.file = log_file.to_string_lossy().into_owned();
        }
        if self.no_color {
            settings.logging.color = false;
        }
    }
}
