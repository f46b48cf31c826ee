use review_server::{Config, Server, init_logger_with_file};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(
        "Starting review-server {} (env: {}, restaurant: {})",
        env!("CARGO_PKG_VERSION"),
        config.environment,
        config.restaurant_name
    );

    let server = Server::new(config).await?;
    server.run().await?;

    Ok(())
}
