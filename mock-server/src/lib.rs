use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const STATUSES_PATH: &str = "/api/user_api/homework_statuses/";

/// A message captured by the fake `sendMessage` endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub chat_id: String,
    pub text: String,
}

#[derive(Deserialize)]
pub struct StatusQuery {
    pub from_date: Option<i64>,
}

#[derive(Deserialize)]
pub struct SendMessageBody {
    pub chat_id: Value,
    pub text: String,
}

#[derive(Debug)]
struct Inner {
    practicum_token: String,
    bot_token: String,
    status_code: u16,
    envelope: Value,
    from_dates: Vec<i64>,
    messages: Vec<SentMessage>,
}

/// Shared, scriptable state behind both fake endpoints.
///
/// Tests keep a clone of the handle to script the next status response and
/// inspect what the bot sent.
#[derive(Clone, Debug)]
pub struct MockState {
    inner: Arc<Mutex<Inner>>,
}

impl MockState {
    pub fn new(practicum_token: &str, bot_token: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                practicum_token: practicum_token.to_string(),
                bot_token: bot_token.to_string(),
                status_code: 200,
                envelope: json!({"homeworks": [], "current_date": 0}),
                from_dates: Vec::new(),
                messages: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicking handler must not wedge every later request.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_envelope(&self, envelope: Value) {
        self.lock().envelope = envelope;
    }

    /// Answer status requests with `status` instead of 200.
    pub fn set_status_code(&self, status: u16) {
        self.lock().status_code = status;
    }

    pub fn from_dates(&self) -> Vec<i64> {
        self.lock().from_dates.clone()
    }

    pub fn messages(&self) -> Vec<SentMessage> {
        self.lock().messages.clone()
    }
}

pub fn app(state: MockState) -> Router {
    Router::new()
        .route(STATUSES_PATH, get(homework_statuses))
        .route("/{bot}/sendMessage", post(send_message))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn homework_statuses(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(query): Query<StatusQuery>,
) -> (StatusCode, Json<Value>) {
    let mut inner = state.lock();
    let expected = format!("OAuth {}", inner.practicum_token);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": "not_authenticated", "message": "Учетные данные не были предоставлены."})),
        );
    }
    let Some(from_date) = query.from_date else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {"error": "from_date is required"}, "code": "UnknownError"})),
        );
    };
    inner.from_dates.push(from_date);

    let status = StatusCode::from_u16(inner.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(inner.envelope.clone()))
}

async fn send_message(
    State(state): State<MockState>,
    Path(bot): Path<String>,
    Json(body): Json<SendMessageBody>,
) -> (StatusCode, Json<Value>) {
    let mut inner = state.lock();
    if bot.strip_prefix("bot") != Some(inner.bot_token.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"ok": false, "error_code": 401, "description": "Unauthorized"})),
        );
    }
    let chat_id = match body.chat_id {
        Value::String(s) => s,
        other => other.to_string(),
    };
    inner.messages.push(SentMessage {
        chat_id: chat_id.clone(),
        text: body.text.clone(),
    });
    let message_id = inner.messages.len();
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "result": {"message_id": message_id, "chat": {"id": chat_id}, "text": body.text}
        })),
    )
}
