use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod env;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match cli::App::parse().run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("sumcheck: {err:#}");
            ExitCode::FAILURE
        }
    }
}
