//! Criterion benchmarks for tagged_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tagged_logger::core::formatter::{derived_tags, format_line};
use tagged_logger::prelude::*;
use tagged_logger::{info, ExecutionContext, LogEntry, Origin, TagFilter};

// ============================================================================
// Call-site Benchmarks
// ============================================================================

fn bench_call_site(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_site");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder()
        .label("Bench")
        .sink(|line: &str| {
            black_box(line);
        })
        .build()
        .expect("Failed to build logger");

    group.bench_function("info_delivered", |b| {
        b.iter(|| info!(logger, "Info message {}", black_box(42)));
    });
    logger.drain();

    logger.set_enabled(false);
    group.bench_function("info_disabled", |b| {
        b.iter(|| info!(logger, "Info message {}", black_box(42)));
    });
    logger.drain();

    let release = Logger::builder()
        .build_mode(BuildMode::Release)
        .build()
        .expect("Failed to build logger");
    group.bench_function("debug_in_release", |b| {
        b.iter(|| tagged_logger::debug!(release, "Debug detail {}", black_box(42)));
    });

    group.finish();
}

// ============================================================================
// Pipeline Stage Benchmarks
// ============================================================================

fn sample_entry() -> LogEntry {
    let origin = Origin {
        file: "src/auth/session.rs".to_string(),
        function: "refresh(token:)".to_string(),
        line: 120,
        execution: ExecutionContext::current(),
        elapsed_ms: 1234.5678,
    };
    LogEntry::new(
        LogOptions::new(LogLevel::Info)
            .tags(["auth", "session", "retry"])
            .context("SessionStore"),
        "Refreshing session token for user 42".to_string(),
        origin,
    )
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    group.throughput(Throughput::Elements(1));

    let entry = sample_entry();

    let mut filter = TagFilter::new();
    filter.suppress(["secret", "pii"]);
    filter.restrict_to(["auth", "billing"]);

    group.bench_function("derive_and_filter", |b| {
        b.iter(|| filter.permits(&derived_tags(black_box(&entry))));
    });

    group.bench_function("format_with_tags", |b| {
        b.iter(|| format_line("Auth", black_box(&entry), true));
    });

    group.finish();
}

// ============================================================================
// Drain Benchmarks
// ============================================================================

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");
    group.throughput(Throughput::Elements(100));

    let capture = MemoryTransport::new();
    let logger = Logger::builder()
        .transport(capture.clone())
        .build()
        .expect("Failed to build logger");

    group.bench_function("log_100_then_drain", |b| {
        b.iter(|| {
            for i in 0..100 {
                info!(logger, "Message {}", i);
            }
            logger.drain();
            capture.clear();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_call_site, bench_stages, bench_drain);
criterion_main!(benches);
