//! Common test utilities and helpers

#![allow(dead_code)]

use chrono::{Duration, Local};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use usage_badges::app::config::{AppConfig, SentryConfig, DEFAULT_BASE_URL};

/// Builder for Sentry event payloads as the issue events API returns them
pub struct EventBuilder {
    days_ago: i64,
    user: Value,
    tags: Vec<(String, String)>,
}

impl EventBuilder {
    /// An event created `days_ago` days before now
    pub fn new(days_ago: i64) -> Self {
        Self {
            days_ago,
            user: Value::Null,
            tags: Vec::new(),
        }
    }

    /// Set the reporting user's id
    pub fn user(mut self, id: &str) -> Self {
        self.user = json!({ "id": id });
        self
    }

    /// Add a tag
    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.tags.push((key.to_string(), value.to_string()));
        self
    }

    /// Add the tags a car probe reports
    pub fn car(self, vehicle_type: &str, hmi_type: &str) -> Self {
        self.tag("vehicle_type", vehicle_type)
            .tag("hmi_type", hmi_type)
    }

    /// Build the JSON payload
    pub fn build(self) -> Value {
        let created = Local::now() - Duration::days(self.days_ago);
        let tags: Vec<Value> = self
            .tags
            .into_iter()
            .map(|(key, value)| json!({ "key": key, "value": value }))
            .collect();
        json!({
            "eventID": format!("evt-{}", self.days_ago),
            "dateCreated": created.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            "user": self.user,
            "tags": tags,
        })
    }
}

/// Configuration writing into `output_dir`, all reports, no dry run
pub fn test_config(output_dir: &Path) -> AppConfig {
    AppConfig {
        verbose: 0,
        log_level: None,
        sentry: SentryConfig {
            auth_token: "test-token".to_string(),
            issue_id: "1234".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        },
        output_dir: PathBuf::from(output_dir),
        window_days: 7,
        reports: Vec::new(),
        dry_run: false,
    }
}
