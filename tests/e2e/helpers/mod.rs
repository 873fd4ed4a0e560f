use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use indextts_worker::controllers::job::JobController;
use indextts_worker::domain::synthesis::SynthesisService;
use indextts_worker::infrastructure::audio::AudioSourceResolver;
use indextts_worker::infrastructure::engine::{EngineHandle, TtsEngine};
use indextts_worker::infrastructure::http::build_router;
use tokio::net::TcpListener;


use api_client::TestClient;
use fixtures::RecordingEngine;

pub struct TestContext {
    pub client: TestClient,
    pub engine: Arc<RecordingEngine>,
}

impl TestContext {
    /// Context with an engine that writes the wav fixture to the requested
    /// output path on every inference call.
    pub async fn new() -> Self {
        Self::with_engine(RecordingEngine::succeeding()).await
    }

    pub async fn with_engine(engine: RecordingEngine) -> Self {
        let engine = Arc::new(engine);
        let dyn_engine: Arc<dyn TtsEngine> = engine.clone();
        let engine_handle = Arc::new(EngineHandle::new(dyn_engine));

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build http client");
        let resolver = AudioSourceResolver::new(http_client);

        let synthesis_service = Arc::new(SynthesisService::new(engine_handle.clone(), resolver));
        let job_controller = Arc::new(JobController::new(synthesis_service));
        let app = build_router(job_controller, engine_handle);

        // Start server
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self {
            client: TestClient::new(&base_url),
            engine,
        }
    }
}

/// Serve the wav fixture over HTTP for URL-reference tests. Returns the full
/// URL of the sample file.
pub async fn spawn_fixture_server() -> String {
    let app = Router::new().route(
        "/speaker.wav",
        get(|| async { fixtures::wav_fixture() }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fixture listener");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/speaker.wav", addr)
}
