use compliance_server::api::{AuthRoutes, ReportRoutes};
use compliance_server::{AppConfig, Lifecycle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Pull in a local .env before anything reads the environment.
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compliance_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "compliance-server starting"
    );

    // Load configuration (every field falls back to a documented default)
    let config = AppConfig::from_env();

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        database = %config.database.name,
        cors_origin = %config.cors.origin,
        "Configuration loaded"
    );

    // The lifecycle object is the single owner of startup and shutdown.
    // Route groups are mounted under /api in the order given here.
    let lifecycle = Lifecycle::new(config);

    if let Err(err) = lifecycle.run(&[&AuthRoutes, &ReportRoutes]).await {
        tracing::error!(error = %err, "Fatal startup error");
        std::process::exit(1);
    }

    tracing::info!("Shutdown complete");
}
