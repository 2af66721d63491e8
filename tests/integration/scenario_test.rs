// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 端到端场景测试
///
/// 使用模拟引擎驱动完整的工作池，检查控制台输出和结果日志

#[cfg(test)]
mod tests {
    use crate::integration::helpers::capture::{RecordingReporter, SharedBuffer};
    use crate::integration::helpers::mock_engine::{MockBehavior, MockEngine};
    use crate::integration::helpers::{context_for, numbered_words, BASE_URL};
    use dirbust::domain::models::outcome::{Outcome, OutcomeCategory, TransportErrorKind};
    use dirbust::domain::models::proxy::{ProxyEndpoint, ProxyPool};
    use dirbust::domain::models::target::Target;
    use dirbust::domain::models::wordlist::Wordlist;
    use dirbust::domain::services::proxy_selector::{ProxySelector, RandomSelection};
    use dirbust::infrastructure::reporter::{ConsoleReporter, OUTCOME_TARGET};
    use dirbust::workers::{RunContext, WorkerPool};
    use std::sync::Arc;
    use std::time::Duration;
    use tracing::{info_span, Instrument, Level};
    use tracing_subscriber::EnvFilter;

    fn mixed_response_engine() -> Arc<MockEngine> {
        Arc::new(
            MockEngine::new(MockBehavior::Status(404))
                .on(&format!("{}/admin", BASE_URL), MockBehavior::Status(200))
                .on(&format!("{}/login", BASE_URL), MockBehavior::Status(404))
                .on(&format!("{}/xyz123", BASE_URL), MockBehavior::Refused),
        )
    }

    #[tokio::test]
    async fn test_console_shows_hits_and_errors_while_log_keeps_all() {
        let console = SharedBuffer::default();
        let log = SharedBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .with_env_filter(EnvFilter::new(format!("{}=debug", OUTCOME_TARGET)))
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let reporter = Arc::new(ConsoleReporter::new(console.clone(), false));
        let context = context_for(&["admin", "login", "xyz123"], reporter);
        let summary = WorkerPool::new(context, mixed_response_engine()).run().await;

        let mut lines = console.lines();
        lines.sort();
        assert_eq!(
            lines,
            vec![
                format!("200 - {}/admin", BASE_URL),
                format!("Connection error - {}/xyz123", BASE_URL),
            ]
        );

        // One log record per probe, including the suppressed 404
        let records = log.lines();
        assert_eq!(records.len(), 3, "log records: {:?}", records);
        assert!(records.iter().any(|r| r.contains("404") && r.contains("/login")));
        assert!(records.iter().any(|r| r.contains("connection refused")));

        assert_eq!(summary.success, 1);
        assert_eq!(summary.suppressed, 1);
        assert_eq!(summary.transport_errors, 1);
    }

    #[tokio::test]
    async fn test_worker_records_carry_the_run_span() {
        let log = SharedBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .with_max_level(Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let reporter = Arc::new(ConsoleReporter::new(SharedBuffer::default(), false));
        let context = context_for(&["a", "b", "c"], reporter);
        let engine = Arc::new(MockEngine::new(MockBehavior::Status(200)));

        WorkerPool::new(context, engine)
            .run()
            .instrument(info_span!("run", run_id = 7))
            .await;

        let outcome_records: Vec<String> = log
            .lines()
            .into_iter()
            .filter(|l| l.contains(OUTCOME_TARGET))
            .collect();
        assert_eq!(outcome_records.len(), 3, "log: {:?}", log.lines());
        assert!(outcome_records.iter().all(|r| r.contains("run_id=7")));
    }

    #[tokio::test]
    async fn test_blank_word_probes_base_with_slash() {
        let reporter = Arc::new(RecordingReporter::default());
        let wordlist = Wordlist::from_text("admin\n\n");
        let context = RunContext::new(Target::new(BASE_URL), wordlist, reporter.clone());
        let engine = Arc::new(MockEngine::new(MockBehavior::Status(200)));

        WorkerPool::new(context, engine.clone()).run().await;

        let mut urls: Vec<String> = engine.calls().into_iter().map(|(url, _)| url).collect();
        urls.sort();
        assert_eq!(
            urls,
            vec![format!("{}/", BASE_URL), format!("{}/admin", BASE_URL)]
        );
        assert_eq!(reporter.outcomes().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_single_proxy_carries_every_request() {
        let endpoint = ProxyEndpoint::parse("10.0.0.1:8080").unwrap();
        let selector = ProxySelector::new(
            Arc::new(ProxyPool::new(vec![endpoint.clone()])),
            None,
            Arc::new(RandomSelection),
        );

        let words = numbered_words(100);
        let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let reporter = Arc::new(RecordingReporter::default());
        let context = context_for(&word_refs, reporter.clone())
            .with_selector(selector)
            .with_concurrency(10);
        let engine = Arc::new(
            MockEngine::new(MockBehavior::Status(404)).with_latency(Duration::from_millis(2)),
        );

        let summary = WorkerPool::new(context, engine.clone()).run().await;

        let calls = engine.calls();
        assert_eq!(calls.len(), 100);
        assert!(calls.iter().all(|(_, proxy)| proxy.as_ref() == Some(&endpoint)));
        assert!(engine.peak_in_flight() <= 10);
        assert_eq!(summary.suppressed, 100);
    }

    #[tokio::test]
    async fn test_proxy_auth_rejection_is_reported_as_proxy_error() {
        let endpoint = ProxyEndpoint::parse("10.0.0.1:8080").unwrap();
        let selector = ProxySelector::new(
            Arc::new(ProxyPool::new(vec![endpoint])),
            None,
            Arc::new(RandomSelection),
        );
        let reporter = Arc::new(RecordingReporter::default());
        let context = context_for(&["admin"], reporter.clone()).with_selector(selector);
        let engine = Arc::new(MockEngine::new(MockBehavior::Status(407)));

        WorkerPool::new(context, engine).run().await;

        let outcomes = reporter.outcomes();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].category(), OutcomeCategory::TransportError);
        match &outcomes[0] {
            Outcome::TransportError { failure, .. } => {
                assert_eq!(failure.kind, TransportErrorKind::Proxy)
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_direct_407_is_not_a_transport_error() {
        let reporter = Arc::new(RecordingReporter::default());
        let context = context_for(&["admin"], reporter.clone());
        let engine = Arc::new(MockEngine::new(MockBehavior::Status(407)));

        WorkerPool::new(context, engine).run().await;

        assert_eq!(
            reporter.outcomes()[0].category(),
            OutcomeCategory::Suppressed
        );
    }
}
