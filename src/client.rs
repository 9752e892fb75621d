//! Mail client abstraction — pure I/O, no filing logic.
//!
//! The real implementation wraps an IMAP session; actions only see
//! this trait. The session is assumed single-threaded, so callers
//! invoke actions sequentially against one client.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::message::Message;

/// Capability trait for the mailbox operations actions perform.
#[async_trait]
pub trait MailClient: Send + Sync {
    /// Move a message from one mailbox to another.
    async fn move_message(
        &self,
        src_mailbox: &str,
        dest_mailbox: &str,
        message_id: &str,
        message: &Message,
    ) -> Result<(), ClientError>;

    /// Delete a message from a mailbox.
    async fn delete_message(
        &self,
        mailbox: &str,
        message_id: &str,
        message: &Message,
    ) -> Result<(), ClientError>;
}
