use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, security_headers};
use crate::handlers::events::{create_event, delete_event, list_events, update_event};
use crate::handlers::{db_test, health_check};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(health_check))
        .route("/db-test", get(db_test))
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/:id", put(update_event).delete(delete_event))
        .with_state(state);

    security_headers()
        .apply(router)
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
}
