pub mod index_tts;

pub use index_tts::IndexTtsEngine;

use crate::domain::synthesis::SynthesisRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Abstracts the underlying synthesis engine.
///
/// Implementations are responsible for:
/// - Loading or locating whatever model assets they need during `initialize`
/// - Writing the generated audio to `request.output_path` during `infer`
#[async_trait]
pub trait TtsEngine: Send + Sync {
    /// Prepare the engine for inference. Called at most once per process.
    async fn initialize(&self) -> Result<(), String>;

    /// Run one synthesis call, blocking until inference completes
    ///
    /// # Errors
    /// Returns error if the engine raises; a clean return with no file at
    /// `request.output_path` must be checked separately by the caller.
    async fn infer(&self, request: &SynthesisRequest) -> Result<(), String>;
}

/// Process-wide handle around the engine. Initialization runs exactly once
/// across all jobs; concurrent first calls are serialized, and a failed
/// attempt is retried on the next call instead of poisoning the handle.
pub struct EngineHandle {
    engine: Arc<dyn TtsEngine>,
    initialized: OnceCell<()>,
}

impl EngineHandle {
    pub fn new(engine: Arc<dyn TtsEngine>) -> Self {
        Self {
            engine,
            initialized: OnceCell::new(),
        }
    }

    pub async fn initialize(&self) -> Result<(), String> {
        self.initialized
            .get_or_try_init(|| async {
                tracing::info!("Initializing TTS engine");
                self.engine.initialize().await
            })
            .await
            .map(|_| ())
    }

    pub async fn infer(&self, request: &SynthesisRequest) -> Result<(), String> {
        self.initialize().await?;
        self.engine.infer(request).await
    }
}
