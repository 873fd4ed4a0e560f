use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use indextts_worker::controllers::job::JobController;
use indextts_worker::domain::synthesis::SynthesisService;
use indextts_worker::infrastructure::audio::AudioSourceResolver;
use indextts_worker::infrastructure::config::{Config, LogFormat};
use indextts_worker::infrastructure::engine::{EngineHandle, IndexTtsEngine};
use indextts_worker::infrastructure::http::start_http_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting IndexTTS worker on {}:{}",
        config.host,
        config.port
    );

    // HTTP client for fetching remote audio references, with a bounded
    // timeout so a stalled download cannot hang a job forever
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .build()?;

    // Synthesis engine: one child process per inference call
    tracing::info!(
        command = %config.engine_command,
        model_dir = %config.model_dir.display(),
        use_fp16 = config.use_fp16,
        "Configuring IndexTTS engine"
    );
    let engine = Arc::new(IndexTtsEngine::new(
        config.engine_command.clone(),
        config.model_dir.clone(),
        config.use_fp16,
    ));
    let engine_handle = Arc::new(EngineHandle::new(engine));

    // Warm the engine at startup; a failed warmup is retried on first use
    // instead of taking the worker down
    if config.warmup_on_start {
        match engine_handle.initialize().await {
            Ok(()) => tracing::info!("Engine warmup complete"),
            Err(e) => tracing::warn!(error = %e, "Engine warmup failed, will retry on first job"),
        }
    }

    // === DEPENDENCY INJECTION SETUP ===
    let resolver = AudioSourceResolver::new(http_client);
    let synthesis_service = Arc::new(SynthesisService::new(engine_handle.clone(), resolver));
    let job_controller = Arc::new(JobController::new(synthesis_service));

    let config = Arc::new(config);

    // Start HTTP server with all routes
    start_http_server(config, job_controller, engine_handle).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "indextts_worker=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "indextts_worker=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
