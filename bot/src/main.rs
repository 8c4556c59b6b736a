use anyhow::Result;
use homework_bot::{config, logging, Config, PollCursor, Poller, TelegramNotifier, UreqTransport};
use homework_core::{PracticumClient, TelegramClient};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Variables already set in the environment take precedence over `.env`.
    dotenvy::dotenv().ok();
    logging::init(&config::log_file_from(|key| std::env::var(key).ok()))?;

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(severity = "critical", "{e}");
            return Err(e.into());
        }
    };
    info!(
        endpoint = %config.practicum_endpoint,
        chat_id = %config.credentials.telegram_chat_id,
        interval_secs = config.poll_interval.as_secs(),
        "homework bot starting"
    );

    let credentials = &config.credentials;
    let transport = UreqTransport::default();
    let notifier = TelegramNotifier::new(
        TelegramClient::new(
            &config.telegram_api_url,
            &credentials.telegram_token,
            &credentials.telegram_chat_id,
        ),
        transport.clone(),
    );
    let poller = Poller::new(
        PracticumClient::new(&config.practicum_endpoint, &credentials.practicum_token),
        transport,
        notifier,
        PollCursor::now(),
        config.poll_interval,
    );

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown requested");
                signal.cancel();
            }
            Err(e) => warn!("cannot listen for ctrl-c: {e}"),
        }
    });

    poller.run(shutdown).await;
    Ok(())
}
