//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are
//! handled inside the auth and academy crates.

use academy::{AcademyConfig, PgAcademyStore, academy_router};
use auth::{AuthConfig, AuthMiddlewareState, PgAuthStore, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use platform::mailer::{MailTransport, TracingMailer, WebhookMailer};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,academy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = if let Ok(secret_b64) = env::var("JWT_SECRET") {
        let jwt_secret = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        AuthConfig {
            jwt_secret,
            ..AuthConfig::default()
        }
    } else if cfg!(debug_assertions) {
        tracing::warn!("JWT_SECRET not set, using a random development secret");
        AuthConfig::with_random_secret()
    } else {
        panic!("JWT_SECRET must be set in production");
    };

    // Mail transport: webhook gateway when configured, log otherwise
    let mailer = match env::var("MAIL_WEBHOOK_URL") {
        Ok(url) => {
            tracing::info!(endpoint = %url, "Using webhook mail transport");
            MailTransport::Webhook(WebhookMailer::new(url, auth_config.mail_from.clone()))
        }
        Err(_) => MailTransport::Tracing(TracingMailer),
    };

    let academy_config = AcademyConfig {
        materials_dir: env::var("MATERIALS_DIR")
            .unwrap_or_else(|_| "media/materials".to_string())
            .into(),
    };

    let auth_store = PgAuthStore::new(pool.clone());
    let academy_store = PgAcademyStore::new(pool.clone());

    let middleware_state = AuthMiddlewareState {
        config: Arc::new(auth_config.clone()),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/api",
            auth_router(auth_store, academy_store.clone(), mailer, auth_config).merge(
                academy_router(academy_store, academy_config, middleware_state),
            ),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
