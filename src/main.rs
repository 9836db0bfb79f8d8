use form_service::config::AppConfig;
use form_service::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Info by default, sqlx only when it has something to warn about
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,sqlx=warn"))
        .init();

    let config = AppConfig::load()?;
    log::info!(
        "configuration loaded: server={} storage={:?}",
        config.server_address(),
        config.storage.backend
    );

    run_server(&config).await
}
