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

use anyhow::Context;
use clap::Parser;
use dirbust::cli::Cli;
use dirbust::config::settings::Settings;
use dirbust::domain::models::proxy::ProxyPool;
use dirbust::domain::models::target::Target;
use dirbust::domain::services::proxy_selector::ProxySelector;
use dirbust::engines::reqwest_engine::{EngineOptions, ReqwestEngine};
use dirbust::infrastructure::metrics;
use dirbust::infrastructure::reporter::ConsoleReporter;
use dirbust::utils::errors::StartupError;
use dirbust::utils::{loaders, telemetry};
use dirbust::workers::{RunContext, WorkerPool};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// 主函数
///
/// 加载配置和输入文件，然后运行工作池直到字典耗尽或收到停止信号
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration
    let mut settings = Settings::new().context("failed to load configuration")?;
    cli.apply_to(&mut settings);
    settings.validate().map_err(StartupError::InvalidSetting)?;

    // 2. Initialize logging
    telemetry::init_telemetry(&settings.logging)?;
    metrics::init_metrics();
    let run_id = Uuid::new_v4();
    info!(%run_id, target_url = %cli.url, "Starting dirbust");

    // 3. Load inputs
    let wordlist = loaders::read_wordlist(&cli.wordlist).await?;
    info!(words = wordlist.len(), path = %cli.wordlist.display(), "Wordlist loaded");

    let pool = match &cli.proxy_file {
        Some(path) => {
            info!(path = %path.display(), "Gathering proxies");
            let pool = loaders::read_proxy_file(path).await?;
            if pool.is_empty() {
                warn!(path = %path.display(), "Proxy file has no entries, using direct connections");
            }
            pool
        }
        None => ProxyPool::default(),
    };

    let selector = ProxySelector::new(
        Arc::new(pool),
        settings.proxy.credentials(),
        settings.proxy.strategy.build(),
    );

    // 4. Initialize engine and reporter
    let engine = Arc::new(ReqwestEngine::new(EngineOptions::from(&settings.http))?);
    let reporter = Arc::new(ConsoleReporter::stdout(settings.logging.color));

    // 5. Run workers
    let context = RunContext::new(Target::new(cli.url.clone()), wordlist, reporter)
        .with_selector(selector)
        .with_concurrency(settings.concurrency.workers)
        .with_grace_period(settings.shutdown.grace_period());

    let summary = WorkerPool::new(context, engine)
        .run_until(stop_signal(settings.shutdown.deadline()))
        .instrument(info_span!("run", %run_id))
        .await;

    if summary.cancelled {
        warn!(
            %run_id,
            undispatched = summary.undispatched,
            "Run cancelled before the wordlist was exhausted"
        );
    }
    info!(%run_id, completed = summary.completed(), "Done");

    Ok(())
}

/// 停止信号
///
/// Ctrl-C 或可选的截止时间，先到者生效
async fn stop_signal(deadline: Option<Duration>) {
    let deadline = async {
        match deadline {
            Some(after) => tokio::time::sleep(after).await,
            None => std::future::pending::<()>().await,
        }
    };

    let interrupted = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(err) => {
                error!("Unable to listen for shutdown signal: {}", err);
                // Without a signal handler only the deadline can stop the run
                std::future::pending::<()>().await
            }
        }
    };

    tokio::select! {
        _ = interrupted => {}
        _ = deadline => info!("Deadline reached"),
    }
}
