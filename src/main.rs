use http_workbench_app::{
    config::Config,
    proxy::HttpProxyService,
    routes::{self, AppState},
};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "http_workbench_app=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Starting HTTP Workbench backend on port {}", config.port);

    let state = AppState {
        proxy: HttpProxyService::arc(&config)?,
    };
    if let Some(path) = &config.frontend_path {
        tracing::info!(path = %path, "Serving frontend assets");
    }
    let app = routes::router(state, config.frontend_path.as_deref());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
