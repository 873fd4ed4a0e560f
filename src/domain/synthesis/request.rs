use std::path::PathBuf;

use super::dto::JobInput;

pub const DEFAULT_EMO_ALPHA: f32 = 1.0;
pub const DEFAULT_INTERVAL_SILENCE_MS: u32 = 200;
pub const DEFAULT_MAX_TEXT_TOKENS_PER_SEGMENT: u32 = 120;

/// Normalized parameter set handed to the synthesis engine. Optional emotion
/// controls are `None` unless the caller supplied a usable value; `None`
/// means the engine applies its own default behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub speaker_audio: PathBuf,
    pub output_path: PathBuf,
    pub emo_audio: Option<PathBuf>,
    pub emo_alpha: f32,
    pub emo_vector: Option<Vec<f32>>,
    pub use_emo_text: bool,
    pub emo_text: Option<String>,
    pub use_random: bool,
    pub interval_silence: u32,
    pub max_text_tokens_per_segment: u32,
    pub verbose: bool,
}

impl SynthesisRequest {
    /// Apply defaults and precedence rules to raw job input. `text` and the
    /// audio paths have already been validated and resolved by the caller.
    pub fn from_input(
        input: &JobInput,
        text: String,
        speaker_audio: PathBuf,
        emo_audio: Option<PathBuf>,
        output_path: PathBuf,
    ) -> Self {
        let use_emo_text = input.use_emo_text.unwrap_or(false);
        // The flag gates the text: emo_text is only forwarded when
        // use_emo_text is set, regardless of whether it was supplied.
        let emo_text = if use_emo_text {
            input.emo_text.clone().filter(|t| !t.is_empty())
        } else {
            None
        };
        let emo_vector = input.emo_vector.clone().filter(|v| !v.is_empty());

        Self {
            text,
            speaker_audio,
            output_path,
            emo_audio,
            emo_alpha: input.emo_alpha.unwrap_or(DEFAULT_EMO_ALPHA),
            emo_vector,
            use_emo_text,
            emo_text,
            use_random: input.use_random.unwrap_or(false),
            interval_silence: input.interval_silence.unwrap_or(DEFAULT_INTERVAL_SILENCE_MS),
            max_text_tokens_per_segment: input
                .max_text_tokens_per_segment
                .unwrap_or(DEFAULT_MAX_TEXT_TOKENS_PER_SEGMENT),
            verbose: input.verbose.unwrap_or(false),
        }
    }
}
