use super::dto::{JobInput, JobSuccess, OUTPUT_FORMAT, OUTPUT_SAMPLE_RATE};
use super::error::SynthesisServiceError;
use super::request::SynthesisRequest;
use crate::infrastructure::audio::{encode_file_base64, AudioSourceResolver};
use crate::infrastructure::engine::EngineHandle;
use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

pub struct SynthesisService {
    engine: Arc<EngineHandle>,
    resolver: AudioSourceResolver,
}

impl SynthesisService {
    pub fn new(engine: Arc<EngineHandle>, resolver: AudioSourceResolver) -> Self {
        Self { engine, resolver }
    }
}

#[async_trait]
pub trait SynthesisServiceApi: Send + Sync {
    /// Process one synthesis job
    ///
    /// This operation:
    /// - Validates required parameters and applies documented defaults
    /// - Resolves the speaker reference (fatal) and emotion reference
    ///   (non-fatal) into local files
    /// - Invokes the synthesis engine and checks the output artifact
    ///
    /// Returns the generated audio base64-encoded alongside the fixed
    /// sample-rate/format contract.
    async fn process(&self, input: JobInput) -> Result<JobSuccess, SynthesisServiceError>;
}

#[async_trait]
impl SynthesisServiceApi for SynthesisService {
    async fn process(&self, input: JobInput) -> Result<JobSuccess, SynthesisServiceError> {
        let started = Instant::now();

        // 1. Validate required parameters (empty counts as missing)
        let text = input
            .text
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or(SynthesisServiceError::MissingParameter("text"))?;
        let speaker_reference = input
            .spk_audio_prompt
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or(SynthesisServiceError::MissingParameter("spk_audio_prompt"))?;

        let text_preview: String = text.chars().take(50).collect();
        tracing::info!(
            text_length = text.len(),
            text_preview = %text_preview,
            "Processing TTS job"
        );

        // 2. Working area scoped to this job; removed on every exit path
        //    when `work_dir` drops.
        let work_dir = tempfile::tempdir().context("failed to create job working directory")?;

        // 3. Resolve the speaker reference into a local file
        let speaker = self
            .resolver
            .resolve(&speaker_reference, &work_dir.path().join("spk_audio.wav"))
            .await
            .map_err(|e| SynthesisServiceError::InvalidAudioReference(e.to_string()))?;
        tracing::info!(source = %speaker.source, "Speaker reference resolved");

        // 4. Resolve the emotion reference if supplied; an unusable value is
        //    dropped rather than failing the job.
        let emo_audio = match input.emo_audio_prompt.as_deref().filter(|s| !s.is_empty()) {
            Some(reference) => {
                match self
                    .resolver
                    .resolve(reference, &work_dir.path().join("emo_audio.wav"))
                    .await
                {
                    Ok(resolved) => {
                        tracing::info!(source = %resolved.source, "Emotion reference resolved");
                        Some(resolved.path)
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "Unresolvable emotion reference, continuing without it"
                        );
                        None
                    }
                }
            }
            None => None,
        };

        // 5. Build the normalized engine request
        let output_path = work_dir.path().join("output.wav");
        let request =
            SynthesisRequest::from_input(&input, text, speaker.path, emo_audio, output_path.clone());

        // 6. Run inference
        self.engine
            .infer(&request)
            .await
            .map_err(SynthesisServiceError::Engine)?;

        // 7. The engine only reports success through the artifact; a clean
        //    return with no output file is its own failure mode.
        if !output_path.exists() {
            return Err(SynthesisServiceError::MissingOutputArtifact);
        }

        // 8. Encode the artifact for transport
        let audio = encode_file_base64(&output_path)
            .await
            .context("failed to read generated audio")?;

        tracing::info!(
            latency_ms = started.elapsed().as_millis(),
            audio_size = audio.len(),
            "TTS job completed"
        );

        Ok(JobSuccess {
            audio,
            sample_rate: OUTPUT_SAMPLE_RATE,
            format: OUTPUT_FORMAT.to_string(),
        })
    }
}
