//! Property-based tests for tagged_logger using proptest

use proptest::prelude::*;
use tagged_logger::core::formatter::{file_stem, format_line, function_name};
use tagged_logger::prelude::*;
use tagged_logger::{ExecutionContext, ExecutionMarker, LogEntry, Origin, TagFilter};

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

fn tag() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    #[test]
    fn test_log_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a < b, (a as u8) < (b as u8));
    }
}

// ============================================================================
// Tag Filter Tests
// ============================================================================

proptest! {
    /// An empty filter never suppresses
    #[test]
    fn test_empty_filter_permits(tags in prop::collection::vec(tag(), 0..6)) {
        prop_assert!(TagFilter::new().permits(&tags));
    }

    /// Any overlap with the ignored set suppresses, whatever is allowed
    #[test]
    fn test_ignored_always_wins(
        tags in prop::collection::vec(tag(), 1..6),
        allowed in prop::collection::vec(tag(), 0..4),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut filter = TagFilter::new();
        filter.restrict_to(allowed);
        filter.restrict_to(tags.clone());
        filter.suppress([pick.get(&tags).clone()]);

        prop_assert!(!filter.permits(&tags));
    }

    /// The decision matches the two-gate definition
    #[test]
    fn test_decision_matches_definition(
        tags in prop::collection::vec(tag(), 0..6),
        allowed in prop::collection::vec(tag(), 0..4),
        ignored in prop::collection::vec(tag(), 0..4),
    ) {
        let mut filter = TagFilter::new();
        filter.restrict_to(allowed.clone());
        filter.suppress(ignored.clone());

        let hits_ignored = tags.iter().any(|t| ignored.contains(t));
        let hits_allowed = tags.iter().any(|t| allowed.contains(t));
        let expected = !hits_ignored && (allowed.is_empty() || hits_allowed);

        prop_assert_eq!(filter.permits(&tags), expected);
    }
}

// ============================================================================
// Formatter Tests
// ============================================================================

proptest! {
    #[test]
    fn test_function_name_never_contains_paren(name in "[a-z_]{1,10}", params in "[a-z:]{0,10}") {
        let raw = format!("{}({})", name, params);
        prop_assert_eq!(function_name(&raw), name.as_str());
    }

    #[test]
    fn test_file_stem_drops_directories_and_extension(dir in "[a-z]{1,6}", stem in "[a-z_]{1,8}") {
        let path = format!("{}/{}.rs", dir, stem);
        prop_assert_eq!(file_stem(&path), stem.as_str());
    }

    /// The message always ends the line verbatim after " => "
    #[test]
    fn test_line_ends_with_message(
        level in any_level(),
        message in ".*",
        tags in prop::collection::vec(tag(), 0..4),
        output_tags in any::<bool>(),
    ) {
        let origin = Origin {
            file: "src/net/client.rs".to_string(),
            function: "connect".to_string(),
            line: 9,
            execution: ExecutionContext { marker: ExecutionMarker::Foreground, thread_id: 1 },
            elapsed_ms: 1.0,
        };
        let entry = LogEntry::new(LogOptions::new(level).tags(tags.clone()), message.clone(), origin);
        let line = format_line("L", &entry, output_tags);

        let expected_start = format!("L[{}:1.00][main:1,client:9,connect", level.to_str());
        let expected_end = format!("] => {}", message);
        prop_assert!(line.starts_with(&expected_start));
        prop_assert!(line.ends_with(&expected_end));
        if output_tags {
            for t in &tags {
                let needle = format!(",{}", t);
                prop_assert!(line.contains(&needle));
            }
        }
    }
}
