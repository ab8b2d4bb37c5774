//! Integration tests for the monitor
//!
//! These tests use wiremock to stand in for both the product pages and the
//! Discord API, and run full monitoring passes end-to-end.

use restock_watch::config::{Config, Credentials, NotifyConfig, Settings};
use restock_watch::monitor::{
    build_http_client, check_target, fetch_page, run_monitor, AvailabilityClassifier, Coordinator,
    FetchResult, NoPause, PacingPolicy, RecordingPause, VerdictReason, ACCEPT_LANGUAGE_VALUE,
    ACCEPT_VALUE, BROWSER_USER_AGENT,
};
use restock_watch::notify::{DiscordNotifier, MemoryNotifier, Notifier};
use restock_watch::output::{CheckOutcome, NotifyStatus};
use restock_watch::target::Target;
use restock_watch::WatchError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const IN_STOCK_PAGE: &str = r#"<html><body>
    <div id="availability"><span>In Stock.</span></div>
    <span class="a-price"><span class="a-offscreen">$19.99</span></span>
    <input id="add-to-cart-button" type="submit">
</body></html>"#;

const UNAVAILABLE_PAGE: &str = r#"<html><body>
    <div id="availability">Currently unavailable.
    We don't know when or if this item will be back in stock.</div>
</body></html>"#;

const BUY_BOX_PAGE: &str = r#"<html><body>
    <input id="buy-now-button" type="submit">
    <span id="price_inside_buybox">$7.50</span>
</body></html>"#;

/// Creates a test configuration pointing at the given targets and API base
fn create_test_config(targets: Vec<String>, api_base: &str) -> Config {
    let mut settings = Settings::default();
    settings.schedule.delay_secs = 0;
    settings.http.timeout_secs = 5;
    settings.notify = NotifyConfig {
        api_base: api_base.to_string(),
    };

    Config {
        credentials: Credentials {
            bot_token: "test-token".to_string(),
            channel_id: "1234".to_string(),
        },
        targets: targets
            .iter()
            .map(|url| Target::parse(url).expect("valid target"))
            .collect(),
        settings,
    }
}

async fn mount_page(server: &MockServer, page_path: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Returns a localhost URL nothing is listening on
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/dp/closed", port)
}

#[tokio::test]
async fn test_full_run_notifies_only_available_items() {
    let shop = MockServer::start().await;
    let discord = MockServer::start().await;

    mount_page(&shop, "/dp/in-stock/ref=sr_1_1", 200, IN_STOCK_PAGE).await;
    mount_page(&shop, "/dp/gone", 200, UNAVAILABLE_PAGE).await;
    mount_page(&shop, "/dp/busy", 503, "Service Unavailable").await;

    let expected_message = format!(
        "🎉 This item is now available! Check it out: {}/dp/in-stock",
        shop.uri()
    );

    Mock::given(method("POST"))
        .and(path("/api/channels/1234/messages"))
        .and(header("authorization", "Bot test-token"))
        .and(body_json(json!({ "content": expected_message })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "1" })))
        .expect(1)
        .mount(&discord)
        .await;

    let config = create_test_config(
        vec![
            format!("{}/dp/in-stock/ref=sr_1_1?tag=abc", shop.uri()),
            format!("{}/dp/gone", shop.uri()),
            format!("{}/dp/busy", shop.uri()),
        ],
        &format!("{}/api", discord.uri()),
    );

    let notifier = DiscordNotifier::new(&config.credentials, &config.settings.notify)
        .expect("notifier");
    let summary = run_monitor(&config, &notifier, &NoPause)
        .await
        .expect("run should start");

    assert_eq!(summary.checked(), 3);
    assert_eq!(summary.available(), 1);
    assert_eq!(summary.unavailable(), 2);
    assert_eq!(summary.errors(), 0);
    assert_eq!(summary.notifications_sent(), 1);

    match &summary.records[0].outcome {
        CheckOutcome::Verdict(verdict) => {
            assert!(verdict.available);
            assert_eq!(verdict.status, "Available - Price: $19.99");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    match &summary.records[1].outcome {
        CheckOutcome::Verdict(verdict) => {
            assert!(!verdict.available);
            assert_eq!(verdict.status, "Currently unavailable");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    match &summary.records[2].outcome {
        CheckOutcome::Verdict(verdict) => {
            assert!(!verdict.available);
            assert_eq!(verdict.status, "HTTP Status: 503");
            assert_eq!(verdict.reason, VerdictReason::HttpStatus(503));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_sends_browser_headers() {
    let shop = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dp/headers"))
        .and(|request: &Request| {
            let value = |name: &str| {
                request
                    .headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            value("user-agent").as_deref() == Some(BROWSER_USER_AGENT)
                && value("accept").as_deref() == Some(ACCEPT_VALUE)
                && value("accept-language").as_deref() == Some(ACCEPT_LANGUAGE_VALUE)
                && value("connection").as_deref() == Some("keep-alive")
        })
        .respond_with(ResponseTemplate::new(200).set_body_string(IN_STOCK_PAGE))
        .expect(1)
        .mount(&shop)
        .await;

    let config = create_test_config(vec![format!("{}/dp/headers", shop.uri())], &shop.uri());
    let client = build_http_client(&config.settings.http).expect("client");

    let result = fetch_page(&client, &config.targets[0]).await.expect("fetch");
    match result {
        FetchResult::Page { status_code, body } => {
            assert_eq!(status_code, 200);
            assert!(body.contains("In Stock."));
        }
        other => panic!("expected page, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_200_skips_classification() {
    let shop = MockServer::start().await;
    // The body would classify as available if it were parsed
    mount_page(&shop, "/dp/redirected", 404, IN_STOCK_PAGE).await;

    let target = Target::parse(&format!("{}/dp/redirected", shop.uri())).unwrap();
    let client = build_http_client(&Settings::default().http).unwrap();
    let classifier = AvailabilityClassifier::new().unwrap();

    let verdict = check_target(&client, &classifier, &target).await.unwrap();
    assert!(!verdict.available);
    assert_eq!(verdict.status, "HTTP Status: 404");
}

#[tokio::test]
async fn test_transport_error_does_not_abort_run() {
    let shop = MockServer::start().await;
    mount_page(&shop, "/dp/buy-box", 200, BUY_BOX_PAGE).await;

    let config = create_test_config(
        vec![closed_port_url(), format!("{}/dp/buy-box", shop.uri())],
        "http://127.0.0.1:9",
    );

    let notifier = MemoryNotifier::new();
    let pause = RecordingPause::new();
    let coordinator = Coordinator::new(&config, &notifier, &pause)
        .expect("coordinator")
        .with_pacing(PacingPolicy::new(Duration::from_secs(10), Duration::ZERO));

    let summary = coordinator.run().await;

    assert_eq!(summary.checked(), 2);
    assert_eq!(summary.errors(), 1);
    assert!(summary.records[0].is_error());
    assert!(summary.records[1].is_available());

    // The delay follows every target, including the failed one
    assert_eq!(
        pause.recorded(),
        vec![Duration::from_secs(10), Duration::from_secs(10)]
    );

    assert_eq!(
        notifier.messages(),
        vec![format!(
            "🎉 This item is now available! Check it out: {}/dp/buy-box",
            shop.uri()
        )]
    );
}

#[tokio::test]
async fn test_transport_error_kind() {
    let target = Target::parse(&closed_port_url()).unwrap();
    let client = build_http_client(&Settings::default().http).unwrap();

    let result = fetch_page(&client, &target).await;
    match result {
        Err(WatchError::Transport { url, .. }) => assert_eq!(url, target.as_str()),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_timeout_is_transport_error() {
    let shop = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dp/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(IN_STOCK_PAGE)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&shop)
        .await;

    let mut config = create_test_config(vec![format!("{}/dp/slow", shop.uri())], &shop.uri());
    config.settings.http.timeout_secs = 1;

    let client = build_http_client(&config.settings.http).unwrap();
    let result = fetch_page(&client, &config.targets[0]).await;
    assert!(matches!(result, Err(WatchError::Transport { .. })));
}

#[tokio::test]
async fn test_notify_failure_is_swallowed() {
    let shop = MockServer::start().await;
    let discord = MockServer::start().await;

    mount_page(&shop, "/dp/a", 200, IN_STOCK_PAGE).await;
    mount_page(&shop, "/dp/b", 200, BUY_BOX_PAGE).await;

    Mock::given(method("POST"))
        .and(path("/channels/1234/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&discord)
        .await;

    let config = create_test_config(
        vec![
            format!("{}/dp/a", shop.uri()),
            format!("{}/dp/b", shop.uri()),
        ],
        &discord.uri(),
    );

    let notifier = DiscordNotifier::new(&config.credentials, &config.settings.notify).unwrap();
    let summary = run_monitor(&config, &notifier, &NoPause).await.unwrap();

    assert_eq!(summary.available(), 2);
    assert_eq!(summary.notifications_failed(), 2);
    assert!(summary
        .records
        .iter()
        .all(|record| record.notify == NotifyStatus::Failed));
}

#[tokio::test]
async fn test_discord_error_message() {
    let discord = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/channels/1234/messages"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Missing Access"))
        .mount(&discord)
        .await;

    let config = create_test_config(vec!["https://a.co/d/XYZ".to_string()], &discord.uri());
    let notifier = DiscordNotifier::new(&config.credentials, &config.settings.notify).unwrap();

    match notifier.send("hello").await {
        Err(WatchError::Notify(message)) => {
            assert!(message.contains("403"));
            assert!(message.contains("Missing Access"));
        }
        other => panic!("expected notify error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_page_is_parse_error() {
    let shop = MockServer::start().await;
    mount_page(&shop, "/dp/blank", 200, "").await;

    let config = create_test_config(vec![format!("{}/dp/blank", shop.uri())], &shop.uri());
    let notifier = MemoryNotifier::new();
    let summary = run_monitor(&config, &notifier, &NoPause).await.unwrap();

    assert_eq!(summary.errors(), 1);
    match &summary.records[0].outcome {
        CheckOutcome::Error(message) => assert!(message.contains("parse")),
        other => panic!("expected parse error, got {:?}", other),
    }
    assert!(notifier.messages().is_empty());
}
