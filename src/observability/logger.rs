//! Structured JSON logging
//!
//! - One log line = one event
//! - `event` key first, then `severity`, remaining fields sorted by key
//! - Synchronous, no buffering
//! - Deterministic output for identical input

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log an event. Errors go to stderr, everything else to stdout.
pub fn emit(severity: Severity, event: &str, fields: &[(&str, &str)]) {
    if severity >= Severity::Error {
        emit_to(severity, event, fields, &mut io::stderr());
    } else {
        emit_to(severity, event, fields, &mut io::stdout());
    }
}

/// Log at TRACE level
pub fn trace(event: &str, fields: &[(&str, &str)]) {
    emit(Severity::Trace, event, fields);
}

/// Log at INFO level
pub fn info(event: &str, fields: &[(&str, &str)]) {
    emit(Severity::Info, event, fields);
}

/// Log at WARN level
pub fn warn(event: &str, fields: &[(&str, &str)]) {
    emit(Severity::Warn, event, fields);
}

/// Log at ERROR level
pub fn error(event: &str, fields: &[(&str, &str)]) {
    emit(Severity::Error, event, fields);
}

fn emit_to<W: Write>(severity: Severity, event: &str, fields: &[(&str, &str)], writer: &mut W) {
    // Build the line by hand so key order stays deterministic
    let mut line = String::with_capacity(128);
    line.push_str("{\"event\":\"");
    escape_into(&mut line, event);
    line.push_str("\",\"severity\":\"");
    line.push_str(severity.as_str());
    line.push('"');

    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(key, _)| *key);
    for (key, value) in sorted {
        line.push_str(",\"");
        escape_into(&mut line, key);
        line.push_str("\":\"");
        escape_into(&mut line, value);
        line.push('"');
    }

    line.push_str("}\n");

    // One write_all call per line
    let _ = writer.write_all(line.as_bytes());
    let _ = writer.flush();
}

fn escape_into(out: &mut String, raw: &str) {
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
}

/// Render a log line to a string, for tests
#[cfg(test)]
pub fn capture(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    emit_to(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_line_is_valid_json() {
        let line = capture(Severity::Info, "CAST_SKIPPED", &[("resource", "users")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "CAST_SKIPPED");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["resource"], "users");
    }

    #[test]
    fn test_fields_sorted_deterministically() {
        let a = capture(Severity::Info, "E", &[("zebra", "1"), ("apple", "2")]);
        let b = capture(Severity::Info, "E", &[("apple", "2"), ("zebra", "1")]);
        assert_eq!(a, b);
        assert!(a.find("apple").unwrap() < a.find("zebra").unwrap());
    }

    #[test]
    fn test_escaping() {
        let line = capture(Severity::Warn, "E", &[("msg", "say \"hi\"\nthere")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["msg"], "say \"hi\"\nthere");
    }

    #[test]
    fn test_one_line_per_event() {
        let line = capture(Severity::Info, "E", &[("a", "1"), ("b", "2")]);
        assert_eq!(line.chars().filter(|c| *c == '\n').count(), 1);
        assert!(line.ends_with('\n'));
    }
}
