//! Distinct users badge

use crate::error::Result;
use crate::format::format_number;
use crate::sentry::Event;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ReportGenerator;

pub const USERS_REPORT: &str = "weekly_users.json";

/// Distinct user ids seen; events without a user count as one extra member
pub type UserSet = HashSet<Option<String>>;

/// shields.io endpoint badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub schema_version: u8,
    pub label: String,
    pub message: String,
    pub color: String,
    pub cache_seconds: u32,
}

impl Badge {
    pub fn users(count: u64) -> Self {
        Self {
            schema_version: 1,
            label: "users".to_string(),
            message: format_number(count),
            color: "69f".to_string(),
            cache_seconds: 14400,
        }
    }
}

pub fn users_report() -> ReportGenerator<UserSet> {
    ReportGenerator::new(USERS_REPORT, UserSet::new(), add_user, render_badge)
}

fn add_user(users: &mut UserSet, event: &Event) -> Result<Option<UserSet>> {
    users.insert(event.user_id().map(str::to_string));
    Ok(None)
}

fn render_badge(users: &UserSet) -> Result<String> {
    let count = u64::try_from(users.len()).unwrap_or(u64::MAX);
    Ok(serde_json::to_string(&Badge::users(count))?)
}
