//! Tag filtering example
//!
//! Demonstrates the ignore list, the whitelist and how they combine.
//!
//! Run with: cargo run --example tag_filtering

use tagged_logger::prelude::*;
use tagged_logger::info;

fn main() -> Result<()> {
    println!("=== Tagged Logger - Tag Filtering Example ===\n");

    let capture = MemoryTransport::new();
    let logger = Logger::builder()
        .label("Filter")
        .output_tags(true)
        .transport(capture.clone())
        .build()?;

    logger.suppress("secret");
    info!(logger, ["secret"]; "password=hunter2");
    info!(logger, "Public message");

    logger.restrict_to_tags(["auth", "billing"]);
    info!(logger, ["auth"]; "Whitelisted");
    info!(logger, ["net"]; "Not whitelisted");
    info!(logger, ["auth", "secret"]; "Ignored wins over whitelisted");

    logger.drain();

    for line in capture.lines() {
        println!("{}", line);
    }

    let metrics = logger.metrics();
    println!(
        "\nDelivered: {}, filtered: {}, drop rate: {:.2}%",
        metrics.delivered(),
        metrics.filtered(),
        metrics.drop_rate()
    );

    Ok(())
}
