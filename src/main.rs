mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::{database, middleware};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::auth::{
    RequestTokenService, RolePermissionChecker, StaticActorDirectory,
};
use crate::features::embed::{routes as embed_routes, EmbedService};
use crate::features::points::PgPointStore;
use axum::Router;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Uninstall mode: tear down persisted state and exit
    if std::env::args().any(|arg| arg == "--uninstall") {
        tracing::info!("Uninstalling: dropping points table");
        database::uninstall(&pool).await?;
        tracing::info!("Uninstall complete");
        return Ok(());
    }

    // Run migrations automatically (creates the points table on first start)
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Initialize host-delegated collaborators
    let tokens = Arc::new(RequestTokenService::new(
        &config.security.token_secret,
        config.security.token_ttl,
    ));
    let permissions = Arc::new(RolePermissionChecker::new(
        config.security.manage_role.clone(),
    ));
    let directory = Arc::new(StaticActorDirectory::new(
        config.security.actor_display_names.clone(),
    ));
    tracing::info!(
        "Security collaborators initialized (manage role: {})",
        config.security.manage_role
    );

    // Initialize Point Store
    let store = Arc::new(PgPointStore::new(pool.clone()));
    tracing::info!("Point store initialized");

    // Initialize Admin Service
    let admin_service = Arc::new(AdminService::new(
        store.clone(),
        directory,
        Arc::clone(&tokens),
        permissions,
    ));
    tracing::info!("Admin service initialized");

    // Initialize Embed Service
    let embed_service = Arc::new(EmbedService::new(store));
    tracing::info!("Embed service initialized");

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::Json<serde_json::Value> {
        axum::Json(serde_json::json!({ "status": "ok" }))
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Map widget binding scripts for admin pages and public embeds
    let asset_routes = Router::new().nest_service("/assets", ServeDir::new("assets"));

    let app = Router::new()
        .merge(admin_routes::routes(admin_service))
        .merge(embed_routes::routes(embed_service))
        .merge(asset_routes)
        .merge(health_route)
        .layer(axum::middleware::from_fn(middleware::identity_middleware))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));

    axum::serve(listener, app).await?;

    Ok(())
}
