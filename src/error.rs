use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to write artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP status error: {status} from {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Event {event_id} has no usable '{key}' tag")]
    MissingTag { key: &'static str, event_id: String },

    #[error("Unknown report: {0}")]
    UnknownReport(String),
}

impl Error {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_)
            | Self::ConfigFile { .. }
            | Self::Toml(_)
            | Self::UnknownReport(_) => 2,
            Self::MissingTag { .. } => 3,
            _ => 1,
        }
    }

    /// Message shown to the operator, without the error chain
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(message) => format!("Configuration problem: {message}"),
            Self::ConfigFile { path, .. } => {
                format!("Could not read configuration from {}", path.display())
            }
            Self::Toml(e) => format!("Configuration file is not valid TOML: {e}"),
            Self::Request(_) | Self::HttpStatus { .. } => {
                format!("Could not fetch events from Sentry: {self}")
            }
            Self::MissingTag { key, event_id } => format!(
                "Event {event_id} is missing the '{key}' tag; vehicle report cannot be built"
            ),
            Self::UnknownReport(name) => format!("Unknown report '{name}'"),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
