//! CLI argument structures

use clap::Parser;
use std::path::PathBuf;

/// Generate weekly usage badges from Sentry issue events
#[derive(Parser, Debug)]
#[command(name = "usage-badges")]
#[command(
    about = "usage-badges - Fold a week of Sentry issue events into usage badges",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file (default: ./usage-badges.toml if present)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Sentry issue whose events are collected
    #[arg(long, value_name = "ISSUE_ID")]
    pub issue: Option<String>,

    /// Sentry server base URL (default: https://sentry.io)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory the badge files are written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Length of the reporting window in days (default: 7)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// Only generate the named report (repeatable), e.g. weekly_users.json
    #[arg(long = "report", value_name = "NAME")]
    pub reports: Vec<String>,

    /// Print the rendered reports instead of writing files
    #[arg(long)]
    pub dry_run: bool,
}
