use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use promo_studio::controllers::{
    content::ContentController, health::HealthState, track::TrackController, user::UserController,
};
use promo_studio::domain::content::ContentGenerator;
use promo_studio::domain::track::TrackService;
use promo_studio::domain::user::UserService;
use promo_studio::infrastructure::config::{Config, LogFormat};
use promo_studio::infrastructure::db::{check_connection, create_pool, run_migrations};
use promo_studio::infrastructure::http::{build_router, start_http_server};
use promo_studio::infrastructure::repositories::{
    AudioFileRepository, GeneratedContentRepository, HealthCheckRepository,
    OpenAiContentProvider, UserRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Promo Studio on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    // The generator checks the credential itself, so an unconfigured key
    // still produces a working server whose generation calls yield nothing.
    let generator_config = config.generator_config();
    if !generator_config.has_credential() {
        tracing::warn!("OPENAI_API_KEY not set, content generation is disabled");
    }
    let provider = Arc::new(OpenAiContentProvider::from_api_key(
        config.openai_api_key.as_deref().unwrap_or_default(),
        config.openai_model.clone(),
    ));
    tracing::info!(
        model = %config.openai_model,
        timeout_secs = config.content_timeout_secs,
        "Content provider initialized"
    );

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Repositories
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let audio_repo = Arc::new(AudioFileRepository::new(pool.clone()));
    let content_repo = Arc::new(GeneratedContentRepository::new(pool.clone()));
    let health_repo = Arc::new(HealthCheckRepository::new(pool.clone()));

    // 2. Services
    let generator = Arc::new(ContentGenerator::new(provider, generator_config));
    let user_service = Arc::new(UserService::new(user_repo.clone()));
    let track_service = Arc::new(TrackService::new(
        audio_repo,
        user_repo,
        content_repo,
        generator.clone(),
    ));

    // 3. Controllers
    let health_state = Arc::new(HealthState::new(
        pool.clone(),
        health_repo,
        generator.is_configured(),
    ));
    let user_controller = Arc::new(UserController::new(user_service, track_service.clone()));
    let track_controller = Arc::new(TrackController::new(track_service));
    let content_controller = Arc::new(ContentController::new(generator));

    let app = build_router(
        health_state,
        user_controller,
        track_controller,
        content_controller,
    );

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "promo_studio=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
