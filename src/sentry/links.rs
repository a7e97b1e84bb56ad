//! RFC 8288 `Link` header parsing for Sentry cursor pagination
//!
//! Sentry answers every page with a `previous` and a `next` link and flags
//! whether the target holds data with a `results` parameter:
//!
//! ```text
//! <https://sentry.io/api/0/issues/1/events/?&cursor=0:0:1>; rel="previous"; results="false"; cursor="0:0:1",
//! <https://sentry.io/api/0/issues/1/events/?&cursor=0:100:0>; rel="next"; results="true"; cursor="0:100:0"
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// `<url>` followed by its parameters, up to the next link-value
static LINK_VALUE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([^>]*)>([^<]*)").expect("Invalid regex pattern"));

/// `; key=value` or `; key="value"`
static LINK_PARAM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#";\s*([A-Za-z0-9_*-]+)\s*=\s*(?:"([^"]*)"|([^\s;,]*))"#)
        .expect("Invalid regex pattern")
});

/// A single link-value of a `Link` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub url: String,
    pub params: HashMap<String, String>,
}

impl LinkEntry {
    pub fn rel(&self) -> Option<&str> {
        self.params.get("rel").map(String::as_str)
    }

    /// Sentry's `results` hint; links without it are assumed to have data
    pub fn has_results(&self) -> bool {
        self.params
            .get("results")
            .map_or(true, |v| !v.eq_ignore_ascii_case("false"))
    }
}

/// Parses every link-value in a `Link` header, skipping malformed ones
pub fn parse_link_header(header: &str) -> Vec<LinkEntry> {
    LINK_VALUE_REGEX
        .captures_iter(header)
        .map(|caps| LinkEntry {
            url: caps[1].trim().to_string(),
            params: parse_params(&caps[2]),
        })
        .collect()
}

fn parse_params(raw: &str) -> HashMap<String, String> {
    LINK_PARAM_REGEX
        .captures_iter(raw)
        .map(|caps| {
            let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            (caps[1].to_ascii_lowercase(), value.to_string())
        })
        .collect()
}

/// URL of the next page, if the server says one exists
pub fn next_page_url(header: &str) -> Option<String> {
    parse_link_header(header)
        .into_iter()
        .find(|entry| entry.rel() == Some("next"))
        .filter(LinkEntry::has_results)
        .map(|entry| entry.url)
}
