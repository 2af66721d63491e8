// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 代理轮换测试
///
/// 使用真实的 reqwest 引擎，wiremock 充当转发代理

#[cfg(test)]
mod tests {
    use crate::integration::helpers::capture::RecordingReporter;
    use crate::integration::helpers::{context_for, numbered_words};
    use dirbust::domain::models::outcome::{Outcome, TransportErrorKind};
    use dirbust::domain::models::proxy::{ProxyCredentials, ProxyEndpoint, ProxyPool};
    use dirbust::domain::services::proxy_selector::{
        ProxySelector, RandomSelection, SelectionStrategyKind,
    };
    use dirbust::engines::reqwest_engine::{EngineOptions, ReqwestEngine};
    use dirbust::workers::WorkerPool;
    use std::sync::Arc;
    use wiremock::matchers::{any, header};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint_for(server: &MockServer) -> ProxyEndpoint {
        ProxyEndpoint::parse(&server.address().to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_single_proxy_receives_every_probe() {
        let proxy = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(100)
            .mount(&proxy)
            .await;

        let selector = ProxySelector::new(
            Arc::new(ProxyPool::new(vec![endpoint_for(&proxy)])),
            None,
            Arc::new(RandomSelection),
        );
        let words = numbered_words(100);
        let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let reporter = Arc::new(RecordingReporter::default());
        let context = context_for(&word_refs, reporter.clone())
            .with_selector(selector)
            .with_concurrency(10);
        let engine = Arc::new(ReqwestEngine::new(EngineOptions::default()).unwrap());

        let summary = WorkerPool::new(context, engine.clone()).run().await;

        assert_eq!(summary.success, 100);
        assert!(summary.peak_in_flight <= 10);
        assert_eq!(engine.cached_proxy_clients(), 1);
        proxy.verify().await;
    }

    #[tokio::test]
    async fn test_round_robin_spreads_load_evenly() {
        let first = MockServer::start().await;
        let second = MockServer::start().await;
        for server in [&first, &second] {
            Mock::given(any())
                .respond_with(ResponseTemplate::new(404))
                .expect(20)
                .mount(server)
                .await;
        }

        let selector = ProxySelector::new(
            Arc::new(ProxyPool::new(vec![endpoint_for(&first), endpoint_for(&second)])),
            None,
            SelectionStrategyKind::RoundRobin.build(),
        );
        let words = numbered_words(40);
        let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let reporter = Arc::new(RecordingReporter::default());
        let context = context_for(&word_refs, reporter.clone())
            .with_selector(selector)
            .with_concurrency(4);
        let engine = Arc::new(ReqwestEngine::new(EngineOptions::default()).unwrap());

        let summary = WorkerPool::new(context, engine).run().await;

        assert_eq!(summary.suppressed, 40);
        first.verify().await;
        second.verify().await;
    }

    #[tokio::test]
    async fn test_global_credentials_reach_the_proxy() {
        let proxy = MockServer::start().await;
        // base64("user:pass")
        Mock::given(header("proxy-authorization", "Basic dXNlcjpwYXNz"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&proxy)
            .await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(407))
            .mount(&proxy)
            .await;

        let selector = ProxySelector::new(
            Arc::new(ProxyPool::new(vec![endpoint_for(&proxy)])),
            Some(ProxyCredentials::new("user", "pass")),
            Arc::new(RandomSelection),
        );
        let reporter = Arc::new(RecordingReporter::default());
        let context = context_for(&["admin"], reporter.clone()).with_selector(selector);
        let engine = Arc::new(ReqwestEngine::new(EngineOptions::default()).unwrap());

        WorkerPool::new(context, engine).run().await;

        let outcomes = reporter.outcomes();
        assert!(
            matches!(outcomes[0], Outcome::Success { status: 200, .. }),
            "unexpected outcome {:?}",
            outcomes[0]
        );
    }

    #[tokio::test]
    async fn test_missing_credentials_yield_proxy_error() {
        let proxy = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(407))
            .mount(&proxy)
            .await;

        let selector = ProxySelector::new(
            Arc::new(ProxyPool::new(vec![endpoint_for(&proxy)])),
            None,
            Arc::new(RandomSelection),
        );
        let reporter = Arc::new(RecordingReporter::default());
        let context = context_for(&["admin"], reporter.clone()).with_selector(selector);
        let engine = Arc::new(ReqwestEngine::new(EngineOptions::default()).unwrap());

        WorkerPool::new(context, engine).run().await;

        match &reporter.outcomes()[0] {
            Outcome::TransportError { failure, .. } => {
                assert_eq!(failure.kind, TransportErrorKind::Proxy)
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
