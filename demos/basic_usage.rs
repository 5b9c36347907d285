//! Basic logger usage example
//!
//! Demonstrates building a logger, registering transports and logging at
//! different levels.
//!
//! Run with: cargo run --example basic_usage

use tagged_logger::prelude::*;
use tagged_logger::{debug, error, info, log, warn};

fn main() -> Result<()> {
    println!("=== Tagged Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .label("Demo")
        .transport(ConsoleTransport::new())
        .build()?;

    println!("1. Logging at different levels:");
    debug!(logger, "This is a debug message (release builds skip it)");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");
    logger.drain();

    println!("\n2. Showing explicit tags:");
    logger.set_output_tags(true);
    info!(logger, ["net", "retry"]; "Retry {} of {}", 2, 5);
    log!(logger, LogOptions::new(LogLevel::Info).context("SessionStore"); "Session refreshed");
    logger.drain();

    println!("\n3. Disabled logger, forced entry:");
    logger.set_enabled(false);
    info!(logger, "Hidden while disabled");
    log!(logger, LogOptions::new(LogLevel::Error).force(true); "Forced entries always reach the console");
    logger.drain();

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
