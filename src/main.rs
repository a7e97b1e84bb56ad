use clap::Parser;
use usage_badges::app::{handle_fatal_error, init_logging, run, AppConfig};
use usage_badges::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => handle_fatal_error(e.into(), cli.verbose),
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        handle_fatal_error(e, cli.verbose);
    }
}
