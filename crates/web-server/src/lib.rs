use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Settings;
use engine::ForecastEngine;
use market_data::{FinnhubClient, MarketDataClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};
use tracing;

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ForecastEngine>,
    pub market_data: Arc<dyn MarketDataClient>,
}

/// Builds the application router over the given state.
///
/// Kept separate from [`run_server`] so tests can drive the full routing and
/// middleware stack on an ephemeral listener.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/", get(handlers::get_status))
        .route("/current-price/:symbol", get(handlers::get_current_price))
        .route("/historical/:symbol", get(handlers::get_historical))
        .route("/predict", post(handlers::post_predict))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024 * 10)) // Set a 10MB body limit
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, settings: Settings) -> anyhow::Result<()> {
    // Tracing is initialized by the binary that calls this function.
    let market_data = FinnhubClient::new(&settings.market_data)?;
    let engine = ForecastEngine::new(settings.models);

    let app_state = Arc::new(AppState {
        engine: Arc::new(engine),
        market_data: Arc::new(market_data),
    });
    let app = router(app_state);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
