//! Application configuration
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `usage-badges.toml` in the working directory, or the file given with
//!    `--config`
//! 3. Environment variables (`SENTRY_AUTH_TOKEN`, `SENTRY_ISSUE_ID`,
//!    `SENTRY_BASE_URL`, `USAGE_BADGES_OUTPUT_DIR`, `USAGE_BADGES_LOG_LEVEL`)
//! 4. Command-line flags
//!
//! ```toml
//! log_level = "info"
//!
//! [sentry]
//! auth_token = "sntrys_..."
//! issue_id = "1234567890"
//!
//! [output]
//! dir = "public/badges"
//! window_days = 7
//! ```

use crate::cli::Cli;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "usage-badges.toml";
pub const DEFAULT_BASE_URL: &str = "https://sentry.io";
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Contents of the optional TOML configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub log_level: Option<String>,
    #[serde(default)]
    pub sentry: SentrySection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentrySection {
    pub auth_token: Option<String>,
    pub issue_id: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub dir: Option<PathBuf>,
    pub window_days: Option<u32>,
}

impl FileConfig {
    /// Reads `path`; returns `None` when `required` is false and it does not exist
    pub fn load(path: &Path, required: bool) -> Result<Option<Self>> {
        if !required && !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(toml::from_str(&content)?))
    }

    /// Overlays environment variables, looked up through `var`
    pub fn merge_env_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(token) = var("SENTRY_AUTH_TOKEN") {
            self.sentry.auth_token = Some(token);
        }

        if let Some(issue_id) = var("SENTRY_ISSUE_ID") {
            self.sentry.issue_id = Some(issue_id);
        }

        if let Some(base_url) = var("SENTRY_BASE_URL") {
            self.sentry.base_url = Some(base_url);
        }

        if let Some(dir) = var("USAGE_BADGES_OUTPUT_DIR") {
            self.output.dir = Some(PathBuf::from(dir));
        }

        if let Some(log_level) = var("USAGE_BADGES_LOG_LEVEL") {
            self.log_level = Some(log_level);
        }
    }
}

/// Connection settings for the Sentry API
#[derive(Clone)]
pub struct SentryConfig {
    pub auth_token: String,
    pub issue_id: String,
    pub base_url: String,
}

impl fmt::Debug for SentryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentryConfig")
            .field("auth_token", &"<redacted>")
            .field("issue_id", &self.issue_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Log filter from the config file or environment, used without `-v`
    pub log_level: Option<String>,
    pub sentry: SentryConfig,
    /// Directory the artifacts are written to
    pub output_dir: PathBuf,
    /// Length of the reporting window in days
    pub window_days: u32,
    /// Reports to generate; empty means all
    pub reports: Vec<String>,
    /// Print artifacts instead of writing them
    pub dry_run: bool,
}

impl AppConfig {
    /// Loads configuration from the working directory, process environment
    /// and command line
    pub fn load(cli: &Cli) -> Result<Self> {
        let (path, required) = match &cli.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let file = FileConfig::load(&path, required)?.unwrap_or_default();
        Self::from_sources(cli, file, |key| std::env::var(key).ok())
    }

    /// Combines an already-read file config, an environment lookup and the
    /// command line
    pub fn from_sources(
        cli: &Cli,
        mut file: FileConfig,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        file.merge_env_vars(var);
        let FileConfig {
            log_level,
            sentry,
            output,
        } = file;

        let auth_token = sentry
            .auth_token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "no Sentry auth token; set SENTRY_AUTH_TOKEN or [sentry] auth_token"
                        .to_string(),
                )
            })?;

        let issue_id = cli
            .issue
            .clone()
            .or(sentry.issue_id)
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "no Sentry issue id; pass --issue, set SENTRY_ISSUE_ID or [sentry] issue_id"
                        .to_string(),
                )
            })?;

        let window_days = cli
            .days
            .or(output.window_days)
            .unwrap_or(DEFAULT_WINDOW_DAYS);
        if window_days == 0 {
            return Err(Error::Config("window_days must be at least 1".to_string()));
        }

        Ok(Self {
            verbose: cli.verbose,
            log_level,
            sentry: SentryConfig {
                auth_token,
                issue_id,
                base_url: cli
                    .base_url
                    .clone()
                    .or(sentry.base_url)
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            },
            output_dir: cli
                .output_dir
                .clone()
                .or(output.dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            window_days,
            reports: cli.reports.clone(),
            dry_run: cli.dry_run,
        })
    }

    /// Get the log filter based on verbosity, falling back to the configured level
    pub fn log_level(&self) -> String {
        match self.verbose {
            0 => self.log_level.clone().unwrap_or_else(|| "info".to_string()),
            1 => "debug".to_string(),
            2 => "trace".to_string(),
            _ => "trace,hyper=debug,reqwest=debug".to_string(),
        }
    }
}
