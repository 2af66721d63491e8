// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::LoggingSettings;
use crate::infrastructure::reporter::OUTCOME_TARGET;
use crate::utils::errors::StartupError;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 初始化日志
///
/// 控制台诊断日志写到 stderr（屏蔽结果记录），
/// 结果记录写到每次运行都会清空的日志文件。
/// 默认文件过滤规则下每个结果恰好一条记录，诊断日志需通过 `file_filter` 显式开启。
pub fn init_telemetry(settings: &LoggingSettings) -> Result<(), StartupError> {
    let file = File::create(&settings.file).map_err(|source| StartupError::LogFile {
        path: settings.file.clone().into(),
        source,
    })?;

    let outcome_off: Directive = format!("{}=off", OUTCOME_TARGET)
        .parse()
        .map_err(|e| StartupError::Telemetry(format!("{}", e)))?;
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.console_filter))
        .map_err(|e| StartupError::InvalidSetting(format!("logging.console_filter: {}", e)))?
        .add_directive(outcome_off);
    let file_filter = EnvFilter::try_new(&settings.file_filter)
        .map_err(|e| StartupError::InvalidSetting(format!("logging.file_filter: {}", e)))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .try_init()
        .map_err(|e| StartupError::Telemetry(e.to_string()))
}
