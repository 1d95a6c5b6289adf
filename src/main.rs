// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

// Main entry point for the GitHub OAuth login demo server

use anyhow::Result;
use clap::Parser;
use github_oauth_demo::config::Config;
use github_oauth_demo::server;
use log::info;

/// Minimal web server demonstrating GitHub OAuth login
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Web server port (default: 8080)
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Web server address (default: 127.0.0.1)
    #[arg(long)]
    address: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Disable all logging output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[rocket::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.quiet {
        log::LevelFilter::Off
    } else if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    // Load configuration from the environment; missing OAuth credentials or
    // session secret abort startup here.
    let mut config = Config::from_env()?;
    config.apply_args(args.address, args.port);

    info!(
        "Server starting on {}:{}",
        config.server.address, config.server.port
    );

    let figment = server::server_figment(&config);
    let rocket = server::build_rocket(figment, &config)?;
    rocket.launch().await?;

    Ok(())
}
