use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use osce_core::config::{max_upload_bytes_from_env_value, use_sample_from_env_value};
use osce_core::{CoreConfig, ScenarioService};

/// Main entry point for the OSCE case viewer
///
/// Serves the scenario page, the JSON API and Swagger UI on one HTTP listener.
///
/// # Environment Variables
/// - `OSCE_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `OSCE_USE_SAMPLE`: initial "Use Sample Case" toggle (default: "true")
/// - `OSCE_MAX_UPLOAD_BYTES`: upload size limit (default: 200 MiB)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid, or binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("osce=info".parse()?)
                .add_directive("osce_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("OSCE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let default_use_sample = use_sample_from_env_value(std::env::var("OSCE_USE_SAMPLE").ok())?;
    let max_upload_bytes =
        max_upload_bytes_from_env_value(std::env::var("OSCE_MAX_UPLOAD_BYTES").ok())?;
    let cfg = Arc::new(CoreConfig::new(default_use_sample, max_upload_bytes)?);

    tracing::info!("++ Starting OSCE viewer on {}", addr);
    tracing::info!(
        "++ Use Sample Case defaults to {}, upload limit {} bytes",
        cfg.default_use_sample(),
        cfg.max_upload_bytes()
    );

    let app = api_rest::router(AppState::new(Arc::new(ScenarioService::new(cfg))));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
