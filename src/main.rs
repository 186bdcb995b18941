use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use seatbook_server::config::Config;
use seatbook_server::db;
use seatbook_server::routes::create_routes;
use seatbook_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("seatbook_server=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    let pool = db::connect(&config.database_url, config.max_connections).await?;
    tracing::info!(database_url = %config.database_url, "Successfully connected to database");

    db::migrate(&pool).await?;

    if config.seed_sample_data && db::seed(&pool, &config).await? {
        tracing::info!("Sample data loaded");
    }

    let app = create_routes(AppState::new(pool, config.session_ttl), &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
