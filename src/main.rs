use clap::Parser;
use colored::*;
use std::process;
use taxwalk::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(2);
        }
    };

    // Initialize logging with TAXWALK_LOG environment variable support
    let log_level = std::env::var("TAXWALK_LOG").unwrap_or_else(|_| cli.log_directive(&config));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = taxwalk::cli::run(&cli, &config, &mut out) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(taxwalk::cli::exit_code(&e));
    }
}
