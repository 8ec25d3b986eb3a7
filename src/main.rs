use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hms_api_rest::{ApiConfig, AppState, router};
use hms_assist::{AssistClient, AssistConfig, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use hms_core::{
    CoreConfig, FileVitalsStore,
    constants::{DEFAULT_DATA_DIR, DEFAULT_RECORDED_BY},
};

/// Builds the AI collaborator from the environment, or `None` when no endpoint is set.
fn assist_from_env() -> anyhow::Result<Option<AssistClient>> {
    let Some(endpoint) = std::env::var("HMS_AI_ENDPOINT")
        .ok()
        .filter(|e| !e.trim().is_empty())
    else {
        tracing::info!("HMS_AI_ENDPOINT not set; AI summaries disabled");
        return Ok(None);
    };

    let model = std::env::var("HMS_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
    let timeout_secs = match std::env::var("HMS_AI_TIMEOUT_SECS") {
        Ok(raw) => raw.parse()?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };
    let api_key = std::env::var("HMS_AI_API_KEY").ok();

    let config = AssistConfig::new(endpoint, model, api_key, timeout_secs)?;
    tracing::info!("AI summaries via {} ({})", config.endpoint(), config.model());
    Ok(Some(AssistClient::new(config)?))
}

/// Main entry point for the HMS vitals service
///
/// Starts the REST server with OpenAPI/Swagger UI at `/swagger-ui`.
///
/// # Environment Variables
/// - `HMS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `HMS_DATA_DIR`: Directory for stored vitals (default: "hms_data"); must exist
/// - `HMS_RECORDED_BY`: Label for records saved without an operator (default: "Medical Staff")
/// - `HMS_API_KEY`: API key expected in the `x-api-key` header (required)
/// - `HMS_AI_ENDPOINT`: Chat-completions URL; AI summaries are disabled when unset
/// - `HMS_AI_MODEL`, `HMS_AI_API_KEY`, `HMS_AI_TIMEOUT_SECS`: AI client settings
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("hms=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("HMS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir = std::env::var("HMS_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let api_key = std::env::var("HMS_API_KEY")
        .map_err(|_| anyhow::anyhow!("HMS_API_KEY must be set"))?;

    let recorded_by =
        std::env::var("HMS_RECORDED_BY").unwrap_or_else(|_| DEFAULT_RECORDED_BY.into());
    let core = CoreConfig::new(PathBuf::from(data_dir), recorded_by)?;
    core.ensure_data_dir_exists()?;

    let state = AppState {
        api: Arc::new(ApiConfig::new(api_key)?),
        store: Arc::new(FileVitalsStore::new(&core)),
        core: Arc::new(core),
        assist: assist_from_env()?.map(Arc::new),
    };

    tracing::info!("++ Starting HMS REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
