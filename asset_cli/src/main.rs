//! # Asset Host
//!
//! Command-line entry point for browsing granted asset trees.

use asset_cli::{effective_config, parse_args, usage, ArgsError, AssetHost};
use std::env;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("asset_cli");

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(ArgsError::HelpRequested) => {
            eprintln!("{}", usage(program));
            process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", usage(program));
            process::exit(1);
        }
    };

    let config = effective_config(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    init_tracing(&config.log_filter);

    let host = AssetHost::from_config(&config).unwrap_or_else(|e| {
        eprintln!("Failed to create asset host: {}", e);
        process::exit(1);
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match host.execute(&cli.command, &mut out) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr so `cat` output stays byte-exact
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
