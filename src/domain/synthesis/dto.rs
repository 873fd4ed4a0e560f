use serde::{Deserialize, Serialize};

/// Sample rate of the audio produced by the IndexTTS-2 vocoder
pub const OUTPUT_SAMPLE_RATE: u32 = 24_000;

/// Container format of the generated artifact
pub const OUTPUT_FORMAT: &str = "wav";

/// Job envelope for POST /run. The dispatch runtime wraps the actual
/// parameters in an `input` mapping and may attach its own job id.
#[derive(Debug, Deserialize)]
pub struct JobRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub input: JobInput,
}

/// Raw job parameters as sent by the caller. Every field except `text` and
/// `spk_audio_prompt` is optional; absence means "use the documented
/// default". Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobInput {
    #[serde(default)]
    pub text: Option<String>,
    /// Speaker reference: URL, data URI, base64 payload, or local file path
    #[serde(default)]
    pub spk_audio_prompt: Option<String>,
    /// Optional emotion reference, same forms as the speaker reference
    #[serde(default)]
    pub emo_audio_prompt: Option<String>,
    #[serde(default)]
    pub emo_alpha: Option<f32>,
    #[serde(default)]
    pub emo_vector: Option<Vec<f32>>,
    #[serde(default)]
    pub use_emo_text: Option<bool>,
    #[serde(default)]
    pub emo_text: Option<String>,
    #[serde(default)]
    pub use_random: Option<bool>,
    /// Silence inserted between text segments, in milliseconds
    #[serde(default)]
    pub interval_silence: Option<u32>,
    #[serde(default)]
    pub max_text_tokens_per_segment: Option<u32>,
    #[serde(default)]
    pub verbose: Option<bool>,
}

/// Success payload for a completed job
#[derive(Debug, Serialize, Deserialize)]
pub struct JobSuccess {
    /// Generated audio, base64-encoded
    pub audio: String,
    pub sample_rate: u32,
    pub format: String,
}
