// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 测试默认值、环境变量覆盖和命令行覆盖

#[cfg(test)]
mod tests {
    use clap::Parser;
    use dirbust::cli::Cli;
    use dirbust::config::settings::{Settings, DEFAULT_USER_AGENT};
    use dirbust::domain::services::proxy_selector::SelectionStrategyKind;
    use std::time::Duration;

    #[test]
    fn test_environment_and_cli_layers() {
        std::env::set_var("DIRBUST__CONCURRENCY__WORKERS", "32");
        std::env::set_var("DIRBUST__PROXY__STRATEGY", "round_robin");
        let loaded = Settings::new();
        std::env::remove_var("DIRBUST__CONCURRENCY__WORKERS");
        std::env::remove_var("DIRBUST__PROXY__STRATEGY");

        let mut settings = loaded.unwrap();
        assert_eq!(settings.concurrency.workers, 32);
        assert_eq!(settings.proxy.strategy, SelectionStrategyKind::RoundRobin);
        assert_eq!(settings.http.user_agent, DEFAULT_USER_AGENT);

        // Command line flags win over the environment
        let cli = Cli::parse_from([
            "dirbust",
            "http://example.test",
            "-w",
            "words.txt",
            "-t",
            "4",
            "--timeout",
            "7",
            "--proxy-strategy",
            "random",
        ]);
        cli.apply_to(&mut settings);

        assert_eq!(settings.concurrency.workers, 4);
        assert_eq!(settings.proxy.strategy, SelectionStrategyKind::Random);
        assert_eq!(settings.http.request_timeout(), Some(Duration::from_secs(7)));
        assert!(settings.validate().is_ok());
    }
}
