use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One event of a Sentry issue as returned by the issue events endpoint
///
/// Only the fields the reports read are typed; everything else the API
/// sends is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "eventID", default)]
    pub event_id: Option<String>,

    /// ISO-8601 creation time, compared as a string
    pub date_created: String,

    #[serde(default)]
    pub user: Option<User>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Identifier of the reporting user, if the event carries one
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.id.as_deref())
    }

    /// Best available identifier for log and error messages
    pub fn display_id(&self) -> &str {
        self.event_id
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unknown>")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Numeric ids are kept in their decimal form
    #[serde(default, deserialize_with = "scalar_string")]
    pub id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub value: Option<String>,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

/// Reads any JSON scalar as text; `null` is `None`
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
