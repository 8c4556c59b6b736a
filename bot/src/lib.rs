//! Host side of the homework status bot.
//!
//! # Overview
//! Executes the requests built by `homework-core`, delivers notifications to
//! Telegram and drives the fixed-interval poll loop.
//!
//! # Design
//! - `config` is read once at startup and passed into the components; nothing
//!   below `main` reads the environment.
//! - `Transport` and `Notifier` are the seams the poll loop is generic over,
//!   so cycles can be exercised without a network.
//! - The loop is a single task; only the sleep between cycles is cancellable.

pub mod config;
pub mod logging;
pub mod notifier;
pub mod poller;
pub mod transport;

pub use config::{Config, Credentials};
pub use notifier::{Notifier, TelegramNotifier};
pub use poller::{CycleOutcome, PollCursor, Poller};
pub use transport::{Transport, UreqTransport};
