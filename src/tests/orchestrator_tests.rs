use std::sync::Arc;
use std::time::Duration;

use crate::errors::TransportError;
use crate::implementations::orchestrator::BatchOrchestrator;
use crate::models::outcome::{ AnalysisOutcome, FailureKind, OutcomeCounts };
use crate::models::source::SourceArtifact;
use crate::tests::{ client_with, init_logging, MockTransport, COMPETITOR_JSON };

fn text_source(url: &str, title: &str) -> SourceArtifact {
    SourceArtifact {
        title: Some(title.to_string()),
        ..SourceArtifact::new(url)
    }
}

fn urls(outcomes: &[AnalysisOutcome]) -> Vec<&str> {
    outcomes
        .iter()
        .map(|o| o.url())
        .collect()
}

#[tokio::test]
async fn one_outcome_per_source_in_input_order() {
    init_logging();
    let transport = Arc::new(MockTransport::replying(COMPETITOR_JSON));
    let client = client_with(&transport);
    let sources: Vec<SourceArtifact> = (0..5)
        .map(|i| text_source(&format!("https://site{}.ru/", i), &format!("Сайт {}", i)))
        .collect();

    let report = BatchOrchestrator::new(&client).run(sources).await;

    assert_eq!(report.outcomes().len(), 5);
    assert_eq!(
        urls(report.outcomes()),
        vec![
            "https://site0.ru/",
            "https://site1.ru/",
            "https://site2.ru/",
            "https://site3.ru/",
            "https://site4.ru/"
        ]
    );
    assert!(report.is_all_success());
    assert_eq!(report.exit_code(), 0);
}

#[tokio::test]
async fn fetch_error_becomes_failure_without_model_call() {
    let transport = Arc::new(MockTransport::replying(COMPETITOR_JSON));
    let client = client_with(&transport);

    let report = BatchOrchestrator::new(&client).run(
        vec![SourceArtifact::failed("https://zab.ru/", "Timeout after 40 s")]
    ).await;

    assert_eq!(transport.call_count(), 0);
    assert_eq!(report.outcomes(), &[
        AnalysisOutcome::Failure {
            url: "https://zab.ru/".to_string(),
            kind: FailureKind::Fetch,
            error: "Timeout after 40 s".to_string(),
        },
    ]);
    assert_eq!(report.exit_code(), 2);
}

#[tokio::test]
async fn empty_fetch_error_is_not_a_failure() {
    let transport = Arc::new(MockTransport::replying(COMPETITOR_JSON));
    let client = client_with(&transport);
    let source = SourceArtifact {
        fetch_error: Some(String::new()),
        ..text_source("https://zab.ru/", "ZAB.RU")
    };

    let report = BatchOrchestrator::new(&client).run(vec![source]).await;

    assert!(report.outcomes()[0].is_success());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn whitespace_fetch_error_is_still_a_failure() {
    let transport = Arc::new(MockTransport::replying(COMPETITOR_JSON));
    let client = client_with(&transport);
    let source = SourceArtifact {
        fetch_error: Some(" ".to_string()),
        ..text_source("https://zab.ru/", "ZAB.RU")
    };

    let report = BatchOrchestrator::new(&client).run(vec![source]).await;

    assert_eq!(transport.call_count(), 0);
    assert_eq!(report.outcomes(), &[
        AnalysisOutcome::Failure {
            url: "https://zab.ru/".to_string(),
            kind: FailureKind::Fetch,
            error: " ".to_string(),
        },
    ]);
    assert_eq!(report.exit_code(), 2);
}

#[tokio::test]
async fn transport_failure_is_isolated_to_its_source() {
    let transport = Arc::new(
        MockTransport::replying(COMPETITOR_JSON).fail_when("Второй", || {
            TransportError::Network("connection reset".to_string())
        })
    );
    let client = client_with(&transport);
    let sources = vec![
        text_source("https://one.ru/", "Первый"),
        text_source("https://two.ru/", "Второй"),
        text_source("https://three.ru/", "Третий")
    ];

    let report = BatchOrchestrator::new(&client).run(sources).await;
    let outcomes = report.outcomes();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_success());
    assert!(!outcomes[1].is_success());
    assert!(outcomes[2].is_success());
    assert!(outcomes[1].error().unwrap().contains("connection reset"));
    assert!(matches!(outcomes[1], AnalysisOutcome::Failure { kind: FailureKind::Transport, .. }));
    assert_eq!(report.counts(), OutcomeCounts { success: 2, failure: 1, total: 3 });
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn screenshot_sources_take_the_combined_path() {
    let transport = Arc::new(MockTransport::replying(COMPETITOR_JSON));
    let client = client_with(&transport);
    let with_shot = SourceArtifact {
        screenshot: Some(vec![0xff, 0xd8, 0xff, 0xe0]),
        ..text_source("https://shot.ru/", "Со скриншотом")
    };
    let without_shot = text_source("https://plain.ru/", "Без скриншота");

    BatchOrchestrator::new(&client).run(vec![with_shot, without_shot]).await;

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].model, "vision-model");
    assert_eq!(requests[0].messages[1].content.images().len(), 1);
    assert_eq!(requests[1].model, "text-model");
    assert!(requests[1].messages[1].content.images().is_empty());
}

#[tokio::test]
async fn source_without_any_content_still_succeeds() {
    let transport = Arc::new(MockTransport::replying(COMPETITOR_JSON));
    let client = client_with(&transport);

    let report = BatchOrchestrator::new(&client).run(vec![SourceArtifact::new("https://blank.ru/")]).await;

    assert_eq!(transport.call_count(), 0);
    let analysis = report.outcomes()[0].analysis().unwrap();
    assert!(!analysis.summary.is_empty());
}

#[tokio::test]
async fn concurrent_runs_preserve_input_order() {
    let transport = Arc::new(
        MockTransport::replying(COMPETITOR_JSON)
            .delay_when("Медленный", COMPETITOR_JSON, Duration::from_millis(150))
            .fail_when("Сломанный", || TransportError::MalformedResponse("no choices".to_string()))
    );
    let client = client_with(&transport);
    let sources = vec![
        text_source("https://slow.ru/", "Медленный"),
        text_source("https://broken.ru/", "Сломанный"),
        SourceArtifact::failed("https://down.ru/", "HTTP 503"),
        text_source("https://fast.ru/", "Быстрый")
    ];

    let report = BatchOrchestrator::new(&client).with_concurrency(4).run(sources).await;

    assert_eq!(
        urls(report.outcomes()),
        vec!["https://slow.ru/", "https://broken.ru/", "https://down.ru/", "https://fast.ru/"]
    );
    assert_eq!(report.counts(), OutcomeCounts { success: 2, failure: 2, total: 4 });
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn empty_batch_is_well_formed() {
    let transport = Arc::new(MockTransport::replying(COMPETITOR_JSON));
    let client = client_with(&transport);

    let report = BatchOrchestrator::new(&client).run(Vec::new()).await;

    assert_eq!(report.counts(), OutcomeCounts::default());
    assert!(report.is_all_success());
    assert_eq!(report.exit_code(), 0);
    assert!(report.finished_at >= report.started_at);
}

#[tokio::test]
async fn fully_failed_batch_reports_every_source() {
    let transport = Arc::new(MockTransport::replying(COMPETITOR_JSON));
    let client = client_with(&transport);
    let sources = vec![
        SourceArtifact::failed("https://a.ru/", "DNS error"),
        SourceArtifact::failed("https://b.ru/", "HTTP 404")
    ];

    let report = BatchOrchestrator::new(&client).run(sources).await;

    assert_eq!(report.counts(), OutcomeCounts { success: 0, failure: 2, total: 2 });
    assert_ne!(report.exit_code(), 0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcomes"][0]["status"], "failure");
    assert_eq!(json["outcomes"][0]["kind"], "fetch");
    assert_eq!(json["outcomes"][1]["error"], "HTTP 404");
}

#[tokio::test]
async fn unparseable_model_output_is_still_a_success() {
    let transport = Arc::new(
        MockTransport::replying(COMPETITOR_JSON).reply_when("Болтливый", "Сайт выглядит неплохо, спасибо!")
    );
    let client = client_with(&transport);
    let sources = vec![text_source("https://chatty.ru/", "Болтливый")];

    let report = BatchOrchestrator::new(&client).run(sources).await;

    let analysis = report.outcomes()[0].analysis().unwrap();
    assert!(analysis.is_empty());
    assert_eq!(report.exit_code(), 0);
}
