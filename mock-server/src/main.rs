use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let token = std::env::var("SRHT_TOKEN").unwrap_or_else(|_| "secret".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let db = mock_server::new_db();
    mock_server::seed_tracker(&db, "bugs", "Bug reports").await;
    println!("listening on {addr}");
    mock_server::run(listener, &token, db).await
}
