use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Synthesis engine
    pub engine_command: String,
    pub model_dir: PathBuf,
    pub use_fp16: bool,
    pub warmup_on_start: bool,
    // Remote audio reference fetching
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            engine_command: env::var("ENGINE_COMMAND").unwrap_or_else(|_| "indextts".to_string()),
            model_dir: env::var("MODEL_DIR")
                .unwrap_or_else(|_| "checkpoints".to_string())
                .into(),
            use_fp16: env::var("USE_FP16")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(true),
            warmup_on_start: env::var("WARMUP_ON_START")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(true),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
        };

        Ok(config)
    }
}
