//! Rule actions — what happens to a message once a rule matches.
//!
//! Each configured rule carries one action record; [`factory`] turns
//! that record into an executable [`Action`] at rule-load time, and
//! the driver invokes it once per matching message. Anything that can
//! be validated from configuration alone fails in the constructor,
//! before any message is processed; only `sort-mailing-list`'s
//! per-message destination lookup can fail during `invoke`.

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, info};

use crate::client::MailClient;
use crate::config::{ActionConfig, GlobalConfig};
use crate::error::{ConfigError, Error, ResolveError};
use crate::message::Message;

/// Default pattern for extracting a mailbox suffix from a list-id:
/// the leading dot-delimited token, between optional angle brackets.
const DEFAULT_LIST_ID_REGEX: &str = r"<?([^.]+)\..*>?";

// ── Action trait ────────────────────────────────────────────────────

/// A unit of behavior applied to a matched message.
///
/// Constructed once from configuration, invoked once per matching
/// message. Implementations hold only their resolved configuration —
/// no per-invocation state — and make exactly one client call per
/// invocation.
#[async_trait]
pub trait Action: Send + Sync {
    /// Action name as it appears in the rules file.
    fn name(&self) -> &'static str;

    /// Run the action on one message.
    async fn invoke(
        &self,
        client: &dyn MailClient,
        src_mailbox: &str,
        message_id: &str,
        message: &Message,
    ) -> Result<(), Error>;
}

/// Create an action from a rule's action record.
///
/// This is the sole construction entry point: the rule loader calls it
/// once per configured action. Unknown (or absent) names and any
/// per-action validation failure surface here as [`ConfigError`]s, so
/// an invalid rule set never starts processing messages.
pub fn factory(
    action: &ActionConfig,
    global: &GlobalConfig,
) -> Result<Box<dyn Action>, ConfigError> {
    debug!("new action: {action:?}");
    match action.name.as_deref() {
        Some("move") => Ok(Box::new(Move::new(action))),
        Some("sort-mailing-list") => Ok(Box::new(SortMailingList::new(action)?)),
        Some("delete") => Ok(Box::new(Delete)),
        Some("trash") => Ok(Box::new(Trash::new(action, global)?)),
        _ => Err(ConfigError::UnrecognizedAction(action.clone())),
    }
}

/// Log and perform the move shared by `move`, `sort-mailing-list` and
/// `trash`.
async fn perform_move(
    client: &dyn MailClient,
    src_mailbox: &str,
    dest_mailbox: &str,
    message_id: &str,
    message: &Message,
) -> Result<(), Error> {
    info!("{message_id} ({}) to {dest_mailbox}", message.subject());
    client
        .move_message(src_mailbox, dest_mailbox, message_id, message)
        .await?;
    Ok(())
}

// ── Move ────────────────────────────────────────────────────────────

/// Move the message to a statically configured mailbox.
///
/// `dest-mailbox` may be absent; the destination is then empty. That
/// permissiveness is what lets `trash` layer its own fallback on top.
pub struct Move {
    dest_mailbox: Option<String>,
}

impl Move {
    fn new(action: &ActionConfig) -> Self {
        Self {
            dest_mailbox: action.dest_mailbox.clone(),
        }
    }
}

#[async_trait]
impl Action for Move {
    fn name(&self) -> &'static str {
        "move"
    }

    async fn invoke(
        &self,
        client: &dyn MailClient,
        src_mailbox: &str,
        message_id: &str,
        message: &Message,
    ) -> Result<(), Error> {
        let dest = self.dest_mailbox.as_deref().unwrap_or_default();
        perform_move(client, src_mailbox, dest, message_id, message).await
    }
}

// ── Trash ───────────────────────────────────────────────────────────

/// Move the message to the trashcan.
///
/// The destination is resolved at construction time: a per-rule
/// `dest-mailbox` wins over the global `trash-mailbox`; with neither
/// set, construction fails.
pub struct Trash {
    dest_mailbox: String,
}

impl Trash {
    fn new(action: &ActionConfig, global: &GlobalConfig) -> Result<Self, ConfigError> {
        let dest_mailbox = action
            .dest_mailbox
            .clone()
            .or_else(|| global.trash_mailbox.clone())
            .ok_or(ConfigError::MissingTrashMailbox)?;
        Ok(Self { dest_mailbox })
    }
}

#[async_trait]
impl Action for Trash {
    fn name(&self) -> &'static str {
        "trash"
    }

    async fn invoke(
        &self,
        client: &dyn MailClient,
        src_mailbox: &str,
        message_id: &str,
        message: &Message,
    ) -> Result<(), Error> {
        perform_move(client, src_mailbox, &self.dest_mailbox, message_id, message).await
    }
}

// ── Delete ──────────────────────────────────────────────────────────

/// Delete the message immediately. No configuration, no destination.
pub struct Delete;

#[async_trait]
impl Action for Delete {
    fn name(&self) -> &'static str {
        "delete"
    }

    async fn invoke(
        &self,
        client: &dyn MailClient,
        src_mailbox: &str,
        message_id: &str,
        message: &Message,
    ) -> Result<(), Error> {
        info!("{message_id} ({})", message.subject());
        client
            .delete_message(src_mailbox, message_id, message)
            .await?;
        Ok(())
    }
}

// ── SortMailingList ─────────────────────────────────────────────────

/// Move the message to a mailbox derived from its list-id header.
///
/// The destination is `"{dest-mailbox-base}.{captured}"`, where
/// `captured` is the text matched by one capture group of
/// `dest-mailbox-regex` (default [`DEFAULT_LIST_ID_REGEX`]) searched
/// against the list-id. With more than one group in the pattern,
/// `dest-mailbox-regex-group` must pick one (0-based over the explicit
/// groups); with exactly one it defaults to 0.
pub struct SortMailingList {
    dest_mailbox_base: String,
    regex: Regex,
    group: usize,
}

impl SortMailingList {
    fn new(action: &ActionConfig) -> Result<Self, ConfigError> {
        let dest_mailbox_base = action
            .dest_mailbox_base
            .clone()
            .ok_or_else(|| ConfigError::MissingBaseMailbox(action.clone()))?;

        let pattern = action
            .dest_mailbox_regex
            .as_deref()
            .unwrap_or(DEFAULT_LIST_ID_REGEX);
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })?;

        // captures_len() counts the implicit whole-match group 0.
        let explicit_groups = regex.captures_len() - 1;
        if explicit_groups == 0 {
            return Err(ConfigError::NoCaptureGroup {
                pattern: pattern.to_string(),
            });
        }
        if explicit_groups > 1 && action.dest_mailbox_regex_group.is_none() {
            return Err(ConfigError::AmbiguousGroup {
                pattern: pattern.to_string(),
            });
        }
        let group = action.dest_mailbox_regex_group.unwrap_or(0);

        Ok(Self {
            dest_mailbox_base,
            regex,
            group,
        })
    }

    /// Derive the destination mailbox from one message's list-id.
    ///
    /// Fails with a [`ResolveError`] — the per-message class — when the
    /// pattern does not match or the selected group captured nothing;
    /// the driver reports it and moves on to the next message.
    fn resolve_destination(
        &self,
        message_id: &str,
        message: &Message,
    ) -> Result<String, ResolveError> {
        let list_id = message.header("list-id").unwrap_or_default();
        let captures = self
            .regex
            .captures(list_id)
            .ok_or_else(|| ResolveError::NoMatch {
                list_id: list_id.to_string(),
                pattern: self.regex.as_str().to_string(),
            })?;
        debug!(
            "{message_id} list-id {list_id:?} matched regex {:?}, using group {}",
            self.regex.as_str(),
            self.group,
        );
        // Configured index is 0-based over explicit groups; group 0 of
        // the regex crate is the whole match.
        let captured = captures
            .get(self.group + 1)
            .ok_or_else(|| ResolveError::UnmatchedGroup {
                list_id: list_id.to_string(),
                pattern: self.regex.as_str().to_string(),
                group: self.group,
            })?;
        Ok(format!("{}.{}", self.dest_mailbox_base, captured.as_str()))
    }
}

#[async_trait]
impl Action for SortMailingList {
    fn name(&self) -> &'static str {
        "sort-mailing-list"
    }

    async fn invoke(
        &self,
        client: &dyn MailClient,
        src_mailbox: &str,
        message_id: &str,
        message: &Message,
    ) -> Result<(), Error> {
        let dest = self.resolve_destination(message_id, message)?;
        perform_move(client, src_mailbox, &dest, message_id, message).await
    }
}
