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

use crate::domain::models::proxy::ProxyCredentials;
use crate::domain::services::proxy_selector::SelectionStrategyKind;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// 默认的桌面浏览器 User-Agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/73.0.3683.103 Safari/537.36";

/// 应用程序配置设置
///
/// 包含HTTP、并发、代理、日志和关闭流程等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP配置
    pub http: HttpSettings,
    /// 并发控制配置
    pub concurrency: ConcurrencySettings,
    /// 代理配置
    pub proxy: ProxySettings,
    /// 日志配置
    pub logging: LoggingSettings,
    /// 关闭流程配置
    pub shutdown: ShutdownSettings,
}

/// HTTP配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// User-Agent 请求头
    pub user_agent: String,
    /// 单个请求超时时间（秒），未设置表示不限制
    pub request_timeout_secs: Option<u64>,
    /// 是否跟随重定向
    pub follow_redirects: bool,
    /// 是否接受无效证书
    pub accept_invalid_certs: bool,
    /// 额外的固定请求头
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl HttpSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// 并发控制配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ConcurrencySettings {
    /// 并发工作器数量上限
    pub workers: usize,
}

/// 代理配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ProxySettings {
    /// 代理选择策略
    pub strategy: SelectionStrategyKind,
    /// 全局代理用户名
    pub username: Option<String>,
    /// 全局代理密码
    pub password: Option<String>,
}

impl ProxySettings {
    /// 全局代理认证信息
    ///
    /// 用户名和密码都设置时才返回
    pub fn credentials(&self) -> Option<ProxyCredentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(ProxyCredentials::new(username, password)),
            _ => None,
        }
    }
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// 日志文件路径，每次运行时清空
    pub file: String,
    /// 控制台诊断日志过滤规则
    pub console_filter: String,
    /// 日志文件过滤规则，默认只记录结果
    pub file_filter: String,
    /// 控制台结果是否着色
    pub color: bool,
}

/// 关闭流程配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ShutdownSettings {
    /// 停止派发后等待进行中请求的时间（秒）
    pub grace_period_secs: u64,
    /// 整体运行截止时间（秒）
    pub deadline_secs: Option<u64>,
}

impl ShutdownSettings {
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、配置文件和环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default HTTP settings
            .set_default("http.user_agent", DEFAULT_USER_AGENT)?
            .set_default("http.follow_redirects", false)?
            .set_default("http.accept_invalid_certs", false)?
            // Default Concurrency settings
            .set_default("concurrency.workers", 10)?
            // Default Proxy settings
            .set_default("proxy.strategy", "random")?
            // Default Logging settings
            .set_default("logging.file", "dirbust.log")?
            .set_default("logging.console_filter", "warn,dirbust=info")?
            .set_default("logging.file_filter", "off,dirbust::outcome=debug")?
            .set_default("logging.color", true)?
            // Default Shutdown settings
            .set_default("shutdown.grace_period_secs", 5)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("DIRBUST").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// 校验配置
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 配置有效
    /// * `Err(String)` - 无效配置的说明
    pub fn validate(&self) -> Result<(), String> {
        if self.concurrency.workers == 0 {
            return Err("concurrency.workers must be at least 1".to_string());
        }
        if self.proxy.username.is_some() != self.proxy.password.is_some() {
            return Err("proxy username and password must be set together".to_string());
        }
        Ok(())
    }
}
