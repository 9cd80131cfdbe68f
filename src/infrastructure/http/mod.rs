pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::{
    content::ContentController,
    health::{self, HealthState},
    track::TrackController,
    user::UserController,
};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router with all routes and middleware
pub fn build_router(
    health_state: Arc<HealthState>,
    user_controller: Arc<UserController>,
    track_controller: Arc<TrackController>,
    content_controller: Arc<ContentController>,
) -> Router {
    let user_routes = Router::new()
        .route(
            "/api/users",
            get(UserController::list_users).post(UserController::create_user),
        )
        .route(
            "/api/users/:userId",
            get(UserController::get_user)
                .patch(UserController::update_user)
                .delete(UserController::delete_user),
        )
        .route(
            "/api/users/:userId/tracks",
            get(UserController::list_tracks).post(UserController::create_track),
        )
        .with_state(user_controller);

    let track_routes = Router::new()
        .route(
            "/api/tracks/:trackId",
            get(TrackController::get_track)
                .patch(TrackController::update_track)
                .delete(TrackController::delete_track),
        )
        .route(
            "/api/tracks/:trackId/content",
            get(TrackController::list_content).post(TrackController::generate_content),
        )
        .with_state(track_controller);

    let content_routes = Router::new()
        .route("/api/content/generate", post(ContentController::generate))
        .with_state(content_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(health_state)
        .merge(user_routes)
        .merge(track_routes)
        .merge(content_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Browsers may call the API from any origin during development only
fn cors_layer(config: &Config) -> CorsLayer {
    if config.is_development() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers([axum::http::HeaderName::from_static(X_REQUEST_ID)])
    } else {
        CorsLayer::new()
    }
}

/// Bind the configured address and serve the router until shutdown
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    let app = app.layer(cors_layer(&config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await;
}

/// Resolves once `signal` fires. A signal source that fails never resolves
async fn wait_for_shutdown<F>(signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
