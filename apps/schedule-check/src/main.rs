use std::io;
use std::process::ExitCode;

use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schedule_check::{run, Options};
use shared_config::{AppConfig, DEFAULT_LOG_FILTER};

fn main() -> ExitCode {
    // Loading Env Vars
    dotenv().ok();

    // Logs go to stderr; stdout carries the JSON result
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AppConfig::from_env();

    let outcome = Options::parse(std::env::args().skip(1))
        .and_then(|options| run(&options, &config, io::stdin().lock(), io::stdout().lock()));

    match outcome {
        Ok(()) => {
            info!("Schedule is valid");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = err.exit_code();
            error!("Error: exit {}: {}", code, err);
            ExitCode::from(code as u8)
        }
    }
}
