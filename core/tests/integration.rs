//! Status fetch and message delivery against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives both core clients
//! over real HTTP using ureq. Validates that request building and response
//! parsing agree with what the server actually sends and expects.

use homework_core::{
    current_date, extract_latest, format_status, BotError, HttpMethod, HttpRequest, HttpResponse,
    PracticumClient, TelegramClient,
};
use mock_server::{MockState, SentMessage, STATUSES_PATH};
use serde_json::json;

const PRACTICUM_TOKEN: &str = "practicum-token";
const BOT_TOKEN: &str = "123:ABC";

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// clients handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match req.method {
        HttpMethod::Get => {
            let mut builder = agent.get(&req.path);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&req.path);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.send(req.body.unwrap_or_default().as_bytes())
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    HttpResponse::new(status, body)
}

fn start_server(state: MockState) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, state).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn fetch_format_and_deliver() {
    let state = MockState::new(PRACTICUM_TOKEN, BOT_TOKEN);
    state.set_envelope(json!({
        "homeworks": [{"homework_name": "proj1", "status": "approved", "id": 1}],
        "current_date": 1000
    }));
    let base = start_server(state.clone());

    let practicum = PracticumClient::new(&format!("{base}{STATUSES_PATH}"), PRACTICUM_TOKEN);
    let telegram = TelegramClient::new(&base, BOT_TOKEN, "42");

    // Step 1: fetch and decode.
    let envelope = practicum
        .parse_homework_statuses(execute(practicum.build_homework_statuses(500)))
        .unwrap();
    assert_eq!(state.from_dates(), vec![500]);
    assert_eq!(current_date(&envelope), Some(1000));

    // Step 2: validate and format.
    let message = format_status(&extract_latest(&envelope).unwrap()).unwrap();
    assert!(message.contains("proj1"));

    // Step 3: deliver.
    let req = telegram.build_send_message(&message).unwrap();
    telegram.parse_send_message(execute(req)).unwrap();
    assert_eq!(
        state.messages(),
        vec![SentMessage {
            chat_id: "42".into(),
            text: message
        }]
    );
}

#[test]
fn wrong_oauth_token_is_unexpected_status() {
    let base = start_server(MockState::new(PRACTICUM_TOKEN, BOT_TOKEN));
    let practicum = PracticumClient::new(&format!("{base}{STATUSES_PATH}"), "stale");

    let err = practicum
        .parse_homework_statuses(execute(practicum.build_homework_statuses(0)))
        .unwrap_err();
    assert_eq!(err, BotError::UnexpectedStatus { status: 401 });
}

#[test]
fn server_error_is_unexpected_status() {
    let state = MockState::new(PRACTICUM_TOKEN, BOT_TOKEN);
    state.set_status_code(500);
    let base = start_server(state);
    let practicum = PracticumClient::new(&format!("{base}{STATUSES_PATH}"), PRACTICUM_TOKEN);

    let err = practicum
        .parse_homework_statuses(execute(practicum.build_homework_statuses(0)))
        .unwrap_err();
    assert_eq!(err, BotError::UnexpectedStatus { status: 500 });
}

#[test]
fn wrong_bot_token_is_delivery_error() {
    let state = MockState::new(PRACTICUM_TOKEN, BOT_TOKEN);
    let base = start_server(state.clone());
    let telegram = TelegramClient::new(&base, "999:XYZ", "42");

    let req = telegram.build_send_message("hello").unwrap();
    match telegram.parse_send_message(execute(req)).unwrap_err() {
        BotError::Delivery { recipient, cause } => {
            assert_eq!(recipient, "42");
            assert!(cause.contains("Unauthorized"));
        }
        other => panic!("expected Delivery, got {other:?}"),
    }
    assert!(state.messages().is_empty());
}
