//! Ermine
//!
//! Entity-Relationship Schema Diagram Engine
//!
//! This is the main entry point for the command-line interface.

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(err) = ermine_cli::run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
