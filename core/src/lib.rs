//! IO-free core of the homework status bot.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), then validates the status
//! envelope and turns the latest submission into a notification.
//!
//! # Design
//! - `PracticumClient` and `TelegramClient` are stateless request builders /
//!   response parsers; the host executes the round-trip.
//! - `response` checks the envelope shape, `status` maps status codes to
//!   verdicts. Neither guesses a default when data is missing.
//! - `BotError` is the single closed error set shared with the host.

pub mod client;
pub mod error;
pub mod http;
pub mod response;
pub mod status;
pub mod types;

pub use client::{PracticumClient, TelegramClient, DEFAULT_PRACTICUM_ENDPOINT, DEFAULT_TELEGRAM_API_URL};
pub use error::BotError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::{current_date, extract_homeworks, extract_latest};
pub use status::{failure_message, format_status, HomeworkStatus};
pub use types::{HomeworkRecord, SendMessage};
