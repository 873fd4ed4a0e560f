use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisServiceError {
    #[error("Missing required parameter: '{0}'")]
    MissingParameter(&'static str),
    #[error("Invalid spk_audio_prompt ({0}). Expected a URL, data URI, base64 payload, or file path.")]
    InvalidAudioReference(String),
    #[error("synthesis failed: {0}")]
    Engine(String),
    #[error("Failed to generate audio file")]
    MissingOutputArtifact,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<SynthesisServiceError> for AppError {
    fn from(err: SynthesisServiceError) -> Self {
        match &err {
            SynthesisServiceError::MissingParameter(_)
            | SynthesisServiceError::InvalidAudioReference(_) => {
                AppError::BadRequest(err.to_string())
            }
            SynthesisServiceError::Engine(_) | SynthesisServiceError::MissingOutputArtifact => {
                AppError::ExternalService(err.to_string())
            }
            SynthesisServiceError::Other(e) => AppError::Internal(format!("{e:#}")),
        }
    }
}
