//! mailfiler — rule-driven mail triage core.
//!
//! Declarative rules pair a match condition with one action; this crate
//! is the action side: the factory that turns an action config record
//! into an executable action, and the four actions themselves (move,
//! sort-mailing-list, trash, delete). Connection handling, rule
//! matching, and the CLI live outside this crate and reach it only
//! through [`actions::factory`] and the [`client::MailClient`] trait.

pub mod actions;
pub mod client;
pub mod config;
pub mod error;
pub mod message;
