//! CenPhone CLI - catalog browsing and demo checkout.
//!
//! # Usage
//!
//! ```bash
//! # Print the phone catalog
//! cenphone catalog
//!
//! # Drive the full storefront flow against the embedded store:
//! # register, log in, configure a phone, check out, cancel
//! cenphone demo
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cenphone")]
#[command(author, version, about = "CenPhone CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the phone catalog (brands, models, storage tiers)
    Catalog,
    /// Run the demo checkout flow against the embedded store
    Demo,
}

fn main() {
    // Load .env if present, then initialize tracing from RUST_LOG
    dotenvy::dotenv().ok();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Catalog => commands::catalog::run(),
        Commands::Demo => commands::demo::run(),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        tracing::error!("{}", e.user_message());
        std::process::exit(1);
    }
}
