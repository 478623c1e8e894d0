mod accounting;
mod health;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn app_router() -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api", accounting::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
