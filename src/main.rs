use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use campus_events_map::config::Config;
use campus_events_map::db::{self, PgEventStore};
use campus_events_map::routes::create_routes;
use campus_events_map::state::AppState;

const DEFAULT_LOG_FILTER: &str = "campus_events_map=info,tower_http=info";

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let pool = db::init_pool(&config)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    let app: Router = create_routes(AppState::new(PgEventStore::new(pool)));

    let addr = config.bind_addr();
    tracing::info!("Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
