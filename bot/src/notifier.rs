//! Delivery of notification text to the configured chat.

use homework_core::{BotError, TelegramClient};
use tracing::info;

use crate::transport::Transport;

/// Sends text to one fixed recipient.
pub trait Notifier {
    fn recipient(&self) -> &str;

    /// Deliver `message`. Every failure comes back as `BotError::Delivery`.
    fn notify(&self, message: &str) -> Result<(), BotError>;
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn recipient(&self) -> &str {
        (**self).recipient()
    }

    fn notify(&self, message: &str) -> Result<(), BotError> {
        (**self).notify(message)
    }
}

/// Telegram Bot API notifier.
#[derive(Debug, Clone)]
pub struct TelegramNotifier<T> {
    client: TelegramClient,
    transport: T,
}

impl<T: Transport> TelegramNotifier<T> {
    pub fn new(client: TelegramClient, transport: T) -> Self {
        Self { client, transport }
    }
}

impl<T: Transport> Notifier for TelegramNotifier<T> {
    fn recipient(&self) -> &str {
        self.client.chat_id()
    }

    fn notify(&self, message: &str) -> Result<(), BotError> {
        let request = self.client.build_send_message(message)?;
        let response = self.transport.execute(&request).map_err(|e| match e {
            BotError::Transport(cause) => self.client.delivery(cause),
            other => self.client.delivery(other.to_string()),
        })?;
        self.client.parse_send_message(response)?;
        info!(chat_id = %self.recipient(), "message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homework_core::{HttpRequest, HttpResponse, SendMessage};
    use std::sync::Mutex;

    struct CannedTransport {
        reply: Result<HttpResponse, BotError>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn new(reply: Result<HttpResponse, BotError>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for CannedTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BotError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply.clone()
        }
    }

    fn notifier(transport: &CannedTransport) -> TelegramNotifier<&CannedTransport> {
        TelegramNotifier::new(TelegramClient::new("http://tg", "1:T", "42"), transport)
    }

    #[test]
    fn sends_text_to_recipient() {
        let transport = CannedTransport::new(Ok(HttpResponse::new(200, r#"{"ok":true}"#)));
        notifier(&transport).notify("hello").unwrap();

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let body: SendMessage = serde_json::from_str(seen[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body.chat_id, "42");
        assert_eq!(body.text, "hello");
    }

    #[test]
    fn transport_failure_becomes_delivery_error() {
        let transport = CannedTransport::new(Err(BotError::Transport("Connection refused".into())));
        let err = notifier(&transport).notify("hello").unwrap_err();
        assert_eq!(
            err,
            BotError::Delivery {
                recipient: "42".into(),
                cause: "Connection refused".into()
            }
        );
    }

    #[test]
    fn rejected_send_becomes_delivery_error() {
        let transport = CannedTransport::new(Ok(HttpResponse::new(
            403,
            r#"{"ok":false,"description":"Forbidden: bot was blocked by the user"}"#,
        )));
        let err = notifier(&transport).notify("hello").unwrap_err();
        assert!(matches!(err, BotError::Delivery { ref cause, .. } if cause.contains("blocked")));
    }
}
