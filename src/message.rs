//! Message value — an externally-parsed mail message, reduced to the
//! headers the action layer needs.
//!
//! MIME decoding and body handling happen upstream; actions only ever
//! look up headers (case-insensitively) and format the subject for
//! log lines. Messages are never mutated here.

use serde::{Deserialize, Serialize};

/// An immutable view of a parsed mail message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Header name/value pairs in arrival order. Names keep their
    /// original casing; lookup ignores case.
    headers: Vec<(String, String)>,
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style header addition, mostly for tests and adapters.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header by name, case-insensitively.
    ///
    /// Returns the first matching value, or `None` if the header is
    /// absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The subject line, or an empty string if there is none.
    ///
    /// Used as the human-readable identifier in action log lines.
    pub fn subject(&self) -> &str {
        self.header("subject").unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_case_insensitive() {
        let msg = Message::new().with_header("List-Id", "<dev.example.com>");
        assert_eq!(msg.header("list-id"), Some("<dev.example.com>"));
        assert_eq!(msg.header("LIST-ID"), Some("<dev.example.com>"));
    }

    #[test]
    fn header_lookup_missing_returns_none() {
        let msg = Message::new().with_header("Subject", "hi");
        assert!(msg.header("list-id").is_none());
    }

    #[test]
    fn header_lookup_returns_first_match() {
        let msg = Message::new()
            .with_header("Received", "by a")
            .with_header("Received", "by b");
        assert_eq!(msg.header("received"), Some("by a"));
    }

    #[test]
    fn subject_falls_back_to_empty() {
        assert_eq!(Message::new().subject(), "");
        let msg = Message::new().with_header("SUBJECT", "weekly report");
        assert_eq!(msg.subject(), "weekly report");
    }
}
