use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let practicum_token = std::env::var("PRACTICUM_TOKEN").unwrap_or_else(|_| "practicum".to_string());
    let bot_token = std::env::var("TELEGRAM_TOKEN").unwrap_or_else(|_| "telegram".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr}");
    mock_server::run(listener, mock_server::MockState::new(&practicum_token, &bot_token)).await
}
