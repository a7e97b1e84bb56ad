//! End-to-end report runs against scripted Sentry pages

mod common;

use common::{test_config, EventBuilder};
use serde_json::{json, Value};
use tempfile::TempDir;
use usage_badges::app::runtime::run_with;
use usage_badges::error::Error;
use usage_badges::report::{Badge, USERS_REPORT, VEHICLES_REPORT};
use usage_badges::sentry::MockPageFetcher;

fn read_json(dir: &TempDir, name: &str) -> Value {
    let text = std::fs::read_to_string(dir.path().join(name)).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[tokio::test]
async fn test_week_of_events_across_pages() {
    let dir = TempDir::new().unwrap();
    let fetcher = MockPageFetcher::new()
        .with_page(
            json!([
                EventBuilder::new(0).user("alice").car("F56", "MINI ID5").build(),
                EventBuilder::new(1).user("bob").car("G20", "BMW ID7").build(),
            ]),
            Some("https://sentry.io/api/0/issues/1234/events/?&cursor=0:100:0"),
        )
        .with_page(
            json!([
                EventBuilder::new(2)
                    .user("alice")
                    .car("F56", "MINI ID5")
                    .tag("vehicle_country", "NL")
                    .build(),
                EventBuilder::new(3).car("I01", "BMW ID4").build(),
                EventBuilder::new(30).user("carol").car("F40", "BMW ID7").build(),
            ]),
            Some("https://sentry.io/api/0/issues/1234/events/?&cursor=0:200:0"),
        )
        .with_page(
            json!([EventBuilder::new(31).user("dave").car("F40", "BMW ID7").build()]),
            None,
        );

    let outcome = run_with(
        &test_config(dir.path()),
        fetcher,
        "https://sentry.io/api/0/issues/1234/events/".to_string(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.events, 4);
    assert_eq!(outcome.pages, 2);
    assert!(!outcome.truncated);
    assert_eq!(
        outcome.written,
        vec![dir.path().join(USERS_REPORT), dir.path().join(VEHICLES_REPORT)]
    );

    let badge: Badge = serde_json::from_value(read_json(&dir, USERS_REPORT)).unwrap();
    assert_eq!(badge, Badge::users(3));

    assert_eq!(
        read_json(&dir, VEHICLES_REPORT),
        json!([
            {"vehicle_brand": "MINI", "vehicle_country": "NL", "vehicle_type": "F56"},
            {"vehicle_brand": "BMW", "vehicle_type": "G20"},
            {"vehicle_brand": "BMW", "vehicle_type": "I01"}
        ])
    );
}

#[tokio::test]
async fn test_error_page_keeps_partial_data() {
    let dir = TempDir::new().unwrap();
    let fetcher = MockPageFetcher::new()
        .with_page(
            json!([EventBuilder::new(1).user("alice").car("F56", "MINI ID5").build()]),
            Some("page-2"),
        )
        .with_page(json!({"detail": "You do not have permission"}), Some("page-3"));

    let outcome = run_with(&test_config(dir.path()), fetcher, "page-1".to_string())
        .await
        .unwrap();

    assert!(outcome.truncated);
    assert_eq!(outcome.events, 1);
    assert_eq!(read_json(&dir, USERS_REPORT)["message"], "1");
}

#[tokio::test]
async fn test_missing_hmi_type_aborts_without_artifacts() {
    let dir = TempDir::new().unwrap();
    let fetcher = MockPageFetcher::new().with_page(
        json!([
            EventBuilder::new(1).user("alice").car("F56", "MINI ID5").build(),
            EventBuilder::new(2).user("bob").tag("vehicle_type", "G20").build(),
        ]),
        None,
    );

    let err = run_with(&test_config(dir.path()), fetcher, "page-1".to_string())
        .await
        .unwrap_err();

    match err.downcast_ref::<Error>() {
        Some(Error::MissingTag { key, .. }) => assert_eq!(*key, "hmi_type"),
        other => panic!("expected MissingTag, got {other:?}"),
    }
    assert!(!dir.path().join(USERS_REPORT).exists());
    assert!(!dir.path().join(VEHICLES_REPORT).exists());
}

#[tokio::test]
async fn test_users_only_run_tolerates_missing_hmi_type() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.reports = vec![USERS_REPORT.to_string()];
    let fetcher = MockPageFetcher::new().with_page(
        json!([EventBuilder::new(1).user("bob").build()]),
        None,
    );

    let outcome = run_with(&config, fetcher, "page-1".to_string())
        .await
        .unwrap();

    assert_eq!(outcome.artifacts.len(), 1);
    assert!(dir.path().join(USERS_REPORT).exists());
    assert!(!dir.path().join(VEHICLES_REPORT).exists());
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.dry_run = true;
    let fetcher = MockPageFetcher::new().with_page(json!([]), None);

    let outcome = run_with(&config, fetcher, "page-1".to_string())
        .await
        .unwrap();

    assert!(outcome.written.is_empty());
    assert_eq!(outcome.artifacts[0].contents, serde_json::to_string(&Badge::users(0)).unwrap());
    assert_eq!(outcome.artifacts[1].contents, "[]");
    assert!(!dir.path().join(USERS_REPORT).exists());
}
