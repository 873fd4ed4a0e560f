use super::TtsEngine;
use crate::domain::synthesis::SynthesisRequest;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Instant;
use tokio::process::Command;

/// IndexTTS-2 implementation of the synthesis engine. Each inference call
/// spawns the configured inference command as a child process; model assets
/// live under `model_dir` and are pre-baked into the worker image.
pub struct IndexTtsEngine {
    command: String,
    model_dir: PathBuf,
    use_fp16: bool,
}

impl IndexTtsEngine {
    pub fn new(command: String, model_dir: PathBuf, use_fp16: bool) -> Self {
        Self {
            command,
            model_dir,
            use_fp16,
        }
    }

    /// Hugging Face assets (semantic codec, speaker encoder, vocoder) are
    /// cached inside the model directory rather than the user's home.
    fn hf_cache_dir(&self) -> PathBuf {
        self.model_dir.join("hf_cache")
    }

    /// Build the flat flag set for one inference call. Optional emotion
    /// controls only appear when the normalized request carries them.
    fn build_args(&self, request: &SynthesisRequest) -> Vec<String> {
        let mut args = vec![
            "infer".to_string(),
            "--model-dir".to_string(),
            self.model_dir.display().to_string(),
            "--text".to_string(),
            request.text.clone(),
            "--speaker-audio".to_string(),
            request.speaker_audio.display().to_string(),
            "--output".to_string(),
            request.output_path.display().to_string(),
            "--emo-alpha".to_string(),
            request.emo_alpha.to_string(),
            "--interval-silence".to_string(),
            request.interval_silence.to_string(),
            "--max-text-tokens-per-segment".to_string(),
            request.max_text_tokens_per_segment.to_string(),
        ];

        if let Some(emo_audio) = &request.emo_audio {
            args.push("--emo-audio".to_string());
            args.push(emo_audio.display().to_string());
        }
        if let Some(vector) = &request.emo_vector {
            args.push("--emo-vector".to_string());
            args.push(
                vector
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        if request.use_emo_text {
            args.push("--use-emo-text".to_string());
            if let Some(emo_text) = &request.emo_text {
                args.push("--emo-text".to_string());
                args.push(emo_text.clone());
            }
        }
        if request.use_random {
            args.push("--use-random".to_string());
        }
        if request.verbose {
            args.push("--verbose".to_string());
        }
        if self.use_fp16 {
            args.push("--fp16".to_string());
        }

        args
    }
}

#[async_trait]
impl TtsEngine for IndexTtsEngine {
    async fn initialize(&self) -> Result<(), String> {
        if !self.model_dir.exists() {
            return Err(format!(
                "model directory not found: {}",
                self.model_dir.display()
            ));
        }

        let output = Command::new(&self.command)
            .arg("--version")
            .env("HF_HUB_CACHE", self.hf_cache_dir())
            .output()
            .await
            .map_err(|e| format!("could not run inference command '{}': {}", self.command, e))?;

        if !output.status.success() {
            return Err(format!(
                "inference command version check failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        tracing::info!(
            command = %self.command,
            model_dir = %self.model_dir.display(),
            version = %String::from_utf8_lossy(&output.stdout).trim(),
            "IndexTTS engine ready"
        );
        Ok(())
    }

    async fn infer(&self, request: &SynthesisRequest) -> Result<(), String> {
        let args = self.build_args(request);
        tracing::debug!(command = %self.command, ?args, "Spawning inference command");

        let started = Instant::now();
        let output = Command::new(&self.command)
            .args(&args)
            .env("HF_HUB_CACHE", self.hf_cache_dir())
            .output()
            .await
            .map_err(|e| format!("failed to spawn inference command: {e}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(
                status = ?output.status.code(),
                stderr = %stderr,
                "Inference command failed"
            );
            return Err(format!(
                "inference exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        tracing::info!(
            latency_ms = started.elapsed().as_millis(),
            text_length = request.text.len(),
            "Inference command completed"
        );
        Ok(())
    }
}
