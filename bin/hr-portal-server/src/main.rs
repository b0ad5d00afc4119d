//! HR Portal Server
//!
//! Serves the guarded module pages, access APIs and mock session endpoints.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HRPORTAL_CONFIG` | - | Path to a TOML config file |
//! | `HRPORTAL_HTTP_PORT` | `8080` | HTTP port |
//! | `HRPORTAL_HTTP_HOST` | `0.0.0.0` | Bind address |
//! | `HRPORTAL_CORS_ORIGINS` | `http://localhost:5173` | Comma-separated CORS origins |
//! | `HRPORTAL_SESSION_COOKIE` | `hr_session` | Session cookie name |
//! | `HRPORTAL_SESSION_HEADER` | `x-hr-user` | Session header name |
//! | `HRPORTAL_DEFAULT_USER` | - | User assumed without a session (dev mode only) |
//! | `HRPORTAL_DEV_MODE` | `false` | Enable development mode |
//! | `LOG_FORMAT` | `text` | `json` for structured output |
//! | `RUST_LOG` | `info` | Log level |
//!
//! Pass `--print-config` to print an example configuration file and exit.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tokio::{net::TcpListener, signal};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hr_config::{AppConfig, ConfigLoader};
use hr_portal::{portal_router, ApiDoc, PortalState};

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--print-config") {
        print!("{}", AppConfig::example_toml());
        return Ok(());
    }

    hr_common::logging::init_logging("hr-portal-server");

    info!("Starting HR Portal Server");

    let config = ConfigLoader::new().load().context("loading configuration")?;
    let state = PortalState::from_config(&config).context("building user directory")?;
    info!(
        users = state.directory.len(),
        dev_mode = config.dev_mode,
        "User directory loaded"
    );
    if config.dev_mode {
        warn!("Development mode enabled; sessions are unauthenticated");
    }

    let app = portal_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.http.cors_origins));

    let addr = format!("{}:{}", config.http.host, config.http.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "HR Portal listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HR Portal Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
