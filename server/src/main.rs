//! Mock content API server
//!
//! Serves a deterministically generated catalog of feed sections over two
//! read-only endpoints: a paginated reference listing and a per-section
//! detail lookup. The catalog is built once at startup and injected into
//! handlers as shared immutable state.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod config;
mod cors;
mod error;
mod handlers;


use catalog::Catalog;
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub config: Config,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/sections",
            get(handlers::list_sections).fallback(handlers::not_found),
        )
        .route(
            "/api/section",
            get(handlers::get_section).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(cors::apply))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sectionfeed_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let catalog = Arc::new(Catalog::generate(config.total_items, config.items_per_page));
    tracing::info!(
        total_items = catalog.len(),
        items_per_page = config.items_per_page,
        "Catalog generated"
    );

    let host: IpAddr = config
        .host
        .parse()
        .expect("HOST must be a valid IP address");
    let addr = SocketAddr::new(host, config.port);

    let state = AppState {
        catalog,
        config: config.clone(),
    };
    let app = router(state);

    tracing::info!("Mock content API running at http://{}", addr);
    tracing::info!("  GET /api/sections?page=0  - paginated section references");
    tracing::info!("  GET /api/section?kind=hero&index=0  - section details");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
