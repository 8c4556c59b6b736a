//! Stateless HTTP request builders and response parsers.
//!
//! # Design
//! `PracticumClient` talks to the homework status API and `TelegramClient`
//! to the Bot API. Neither holds mutable state. Each operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the host executes the round-trip.

use serde_json::Value;

use crate::error::BotError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{BotApiReply, SendMessage};

pub const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Client for the homework status endpoint, authenticated with a static
/// OAuth token.
#[derive(Clone)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request every submission whose status changed at or after `from_date`.
    pub fn build_homework_statuses(&self, from_date: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}?from_date={from_date}", self.endpoint),
            headers: vec![("authorization".to_string(), format!("OAuth {}", self.token))],
            body: None,
        }
    }

    /// Decode the envelope without interpreting it; shape checks live in
    /// [`crate::response`].
    pub fn parse_homework_statuses(&self, response: HttpResponse) -> Result<Value, BotError> {
        if response.status != 200 {
            return Err(BotError::UnexpectedStatus {
                status: response.status,
            });
        }
        serde_json::from_str(&response.body)
            .map_err(|e| BotError::Schema(format!("response body is not valid JSON: {e}")))
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Client for the Bot API `sendMessage` method, bound to one chat.
#[derive(Clone)]
pub struct TelegramClient {
    api_base: String,
    token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str, chat_id: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub fn build_send_message(&self, text: &str) -> Result<HttpRequest, BotError> {
        let payload = SendMessage {
            chat_id: self.chat_id.clone(),
            text: text.to_string(),
        };
        let body = serde_json::to_string(&payload).map_err(|e| self.delivery(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/bot{}/sendMessage", self.api_base, self.token),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_send_message(&self, response: HttpResponse) -> Result<(), BotError> {
        let reply = serde_json::from_str::<BotApiReply>(&response.body).ok();
        let description = reply.as_ref().and_then(|r| r.description.clone());

        if response.status != 200 {
            let cause = match description {
                Some(d) => format!("HTTP {}: {d}", response.status),
                None => format!("HTTP {}", response.status),
            };
            return Err(self.delivery(cause));
        }
        match reply {
            Some(BotApiReply { ok: true, .. }) => Ok(()),
            Some(_) => Err(self.delivery(
                description.unwrap_or_else(|| "request rejected".to_string()),
            )),
            None => Err(self.delivery("unreadable Bot API reply".to_string())),
        }
    }

    /// Wrap `cause` as a delivery failure for this client's chat.
    pub fn delivery(&self, cause: String) -> BotError {
        BotError::Delivery {
            recipient: self.chat_id.clone(),
            cause,
        }
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_base", &self.api_base)
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}
