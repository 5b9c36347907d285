//! Line formatter
//!
//! Produces `<label>[<LEVEL>:<elapsed>][<marker>:<thread>,<file>:<line>,<function><,tags>] => <message>`.
//! The tag suffix is only written when tag output is on; it lists the
//! explicit tags followed by the context, if any.

use super::log_entry::LogEntry;
use std::fmt::Write;
use std::path::Path;

const UNKNOWN_FILE: &str = "Unknown file";

/// Base name of a source path without its extension
pub fn file_stem(path: &str) -> &str {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(UNKNOWN_FILE)
}

/// Function name with any parameter list stripped
pub fn function_name(raw: &str) -> &str {
    match raw.find('(') {
        Some(idx) => &raw[..idx],
        None => raw,
    }
}

/// Full tag set of an entry: derived tags first, then explicit, then context
pub fn derived_tags(entry: &LogEntry) -> Vec<String> {
    let origin = &entry.origin;
    let mut tags = Vec::with_capacity(4 + entry.explicit_tags.len() + 1);
    tags.push(function_name(&origin.function).to_string());
    tags.push(origin.execution.marker.to_str().to_string());
    tags.push(file_stem(&origin.file).to_string());
    tags.push(entry.level.to_str().to_string());
    tags.extend(entry.explicit_tags.iter().cloned());
    if let Some(ref context) = entry.context {
        tags.push(context.clone());
    }
    tags
}

pub fn format_line(label: &str, entry: &LogEntry, output_tags: bool) -> String {
    let origin = &entry.origin;
    let mut line = String::with_capacity(label.len() + entry.message.len() + 64);

    // Writing into a String cannot fail
    let _ = write!(
        line,
        "{}[{}:{:.2}][{}:{},{}:{},{}",
        label,
        entry.level.to_str(),
        origin.elapsed_ms,
        origin.execution.marker,
        origin.execution.thread_id,
        file_stem(&origin.file),
        origin.line,
        function_name(&origin.function),
    );

    if output_tags {
        for tag in entry.explicit_tags.iter().chain(entry.context.iter()) {
            line.push(',');
            line.push_str(tag);
        }
    }

    line.push_str("] => ");
    line.push_str(&entry.message);
    line
}
