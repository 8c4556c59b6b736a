//! Error taxonomy for the homework status bot.
//!
//! # Design
//! `BotError` is a closed set. The poll loop matches on it to decide what to
//! log and report, so nothing outside these kinds is ever swallowed by the
//! loop. Only `Config` is fatal; it is raised once at startup before polling
//! begins. Every other variant is scoped to a single poll cycle.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BotError {
    /// Startup configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response (connection refused,
    /// DNS failure, timeout and the like).
    #[error("request to the homework API failed: {0}")]
    Transport(String),

    /// The homework API answered with something other than 200.
    #[error("homework API returned unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    /// The response body does not have the expected shape.
    #[error("malformed API response: {0}")]
    Schema(String),

    /// A homework record carries a status code with no known verdict.
    #[error("unknown homework status: {0:?}")]
    UnknownStatus(String),

    /// A single latest record was requested from an empty list.
    #[error("homework list is empty")]
    EmptyResult,

    /// The messaging service did not accept the message.
    #[error("failed to deliver message to chat {recipient}: {cause}")]
    Delivery { recipient: String, cause: String },
}

impl BotError {
    /// Whether the error must stop the process instead of ending one cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BotError::Config(_))
    }

    /// Short machine-friendly label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            BotError::Config(_) => "config",
            BotError::Transport(_) => "transport",
            BotError::UnexpectedStatus { .. } => "unexpected_status",
            BotError::Schema(_) => "schema",
            BotError::UnknownStatus(_) => "unknown_status",
            BotError::EmptyResult => "empty_result",
            BotError::Delivery { .. } => "delivery",
        }
    }
}
