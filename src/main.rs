use log::{error, info};
use poll_tally::PollError;
use poll_tally::config::Config;
use poll_tally::demo;
use std::io;
use std::process::ExitCode;

fn run(config: &Config) -> Result<(), PollError> {
    let scripts = match &config.definitions_path {
        Some(path) => demo::load_scripts(path)?,
        None => demo::builtin_scripts(),
    };

    // Lock once so the snapshots of one poll are not interleaved
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let results = demo::run_all(&mut out, &scripts, config.output)?;
    info!("Finished {} poll(s)", results.len());
    Ok(())
}

fn main() -> ExitCode {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&config) {
        error!("Poll demo failed: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
