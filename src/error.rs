//! Error types for mailfiler.
//!
//! Two classes matter to callers: [`ConfigError`] is raised while
//! building actions from configuration and must abort the run before
//! any message is touched; [`ResolveError`] is raised per message and
//! the driver is expected to log it and continue with the next message.

use crate::config::ActionConfig;

/// Top-level error type for the filer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

/// Configuration-related errors, raised at rule-load time.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unrecognized rule action {0:?}")]
    UnrecognizedAction(ActionConfig),

    #[error("no dest-mailbox-base given for action {0:?}")]
    MissingBaseMailbox(ActionConfig),

    #[error("no \"trash-mailbox\" set in config")]
    MissingTrashMailbox,

    #[error("invalid dest-mailbox-regex {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    #[error("regex {pattern:?} has no group to select the mailbox name portion")]
    NoCaptureGroup { pattern: String },

    #[error(
        "regex {pattern:?} has multiple groups and the action data \
         does not specify the dest-mailbox-regex-group to use"
    )]
    AmbiguousGroup { pattern: String },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Per-message destination-resolution errors.
///
/// These never abort the run; the driver catches them per message.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("could not determine destination mailbox from list-id {list_id:?} with regex {pattern:?}")]
    NoMatch { list_id: String, pattern: String },

    #[error("group {group} of regex {pattern:?} did not capture anything in list-id {list_id:?}")]
    UnmatchedGroup {
        list_id: String,
        pattern: String,
        group: usize,
    },
}

/// Connection-level errors from the mail client.
///
/// The action layer propagates these unchanged, with no retry logic.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("IMAP protocol error: {0}")]
    Protocol(String),

    #[error("connection lost: {0}")]
    Disconnected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the filer.
pub type Result<T> = std::result::Result<T, Error>;
