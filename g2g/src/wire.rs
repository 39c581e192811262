//! Graphite plaintext line format
//!
//! `<name> <value> <unix-seconds>\n`, one metric per line.

use chrono::Utc;

/// Format a single metric line
pub fn format_line(name: &str, value: &str, timestamp: i64) -> String {
    format!("{} {} {}\n", name, value, timestamp)
}

/// Current wall-clock time in unix seconds
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        assert_eq!(format_line("load", "0.5", 1_700_000_000), "load 0.5 1700000000\n");
    }

    #[test]
    fn test_format_line_keeps_value_verbatim() {
        let line = format_line("app.status", "ready", 42);
        assert_eq!(line, "app.status ready 42\n");
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_unix_now_is_ten_digits() {
        assert_eq!(unix_now().to_string().len(), 10);
    }
}
