use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use auth::AppState;
use auth::jwt::{JwtConfig, JwtService};
use auth::rate_limiter::{LoginLimiter, LoginLimiterConfig};
use auth::repositories::UserRepository;
use auth::routes;
use common::database::{DatabaseConfig, health_check, init_pool};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting account service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Token signing is not optional; refuse to boot without a secret
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(&jwt_config);

    let user_repository = UserRepository::new(pool.clone());
    let login_limiter = LoginLimiter::new(LoginLimiterConfig::default());

    let app_state = AppState {
        db_pool: pool,
        jwt_service,
        user_repository,
        login_limiter,
    };

    info!("Account service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!("Account service listening on 0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
