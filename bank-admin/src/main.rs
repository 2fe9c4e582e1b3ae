use bank_admin::db::BoxError;
use bank_admin::{Config, Server, init_logger};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger(
        &config.log_level,
        !config.is_development(),
        config.log_dir.as_deref(),
    )?;

    tracing::info!(environment = %config.environment, "Starting bank-admin");

    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
