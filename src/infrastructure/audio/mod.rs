use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("download failed: {0}")]
    Download(String),
    #[error("malformed data URI")]
    MalformedDataUri,
    #[error("no decodable payload and no file at that path")]
    Unrecognized,
    #[error("could not write audio file: {0}")]
    Io(#[from] std::io::Error),
}

/// Which of the four accepted reference forms a value turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSourceKind {
    Url,
    DataUri,
    Base64,
    FilePath,
}

impl fmt::Display for AudioSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Url => "url",
            Self::DataUri => "data_uri",
            Self::Base64 => "base64",
            Self::FilePath => "file_path",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedAudio {
    pub path: PathBuf,
    pub source: AudioSourceKind,
}

/// Resolves an audio reference string into a local file.
///
/// Accepted forms, tried in order: remote URL, data URI, bare base64
/// payload, local file path. The decode/download branches write exactly one
/// file to `destination`; the file-path branch uses the named file in place.
pub struct AudioSourceResolver {
    http: reqwest::Client,
}

impl AudioSourceResolver {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub async fn resolve(
        &self,
        reference: &str,
        destination: &Path,
    ) -> Result<ResolvedAudio, ResolveError> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            let bytes = self.download(reference).await?;
            tokio::fs::write(destination, &bytes).await?;
            return Ok(ResolvedAudio {
                path: destination.to_path_buf(),
                source: AudioSourceKind::Url,
            });
        }

        if let Some(rest) = reference.strip_prefix("data:") {
            // Everything after the first comma is the encoded payload; the
            // media-type header is not interpreted.
            let (_, encoded) = rest.split_once(',').ok_or(ResolveError::MalformedDataUri)?;
            let bytes = BASE64
                .decode(encoded)
                .map_err(|_| ResolveError::MalformedDataUri)?;
            tokio::fs::write(destination, &bytes).await?;
            return Ok(ResolvedAudio {
                path: destination.to_path_buf(),
                source: AudioSourceKind::DataUri,
            });
        }

        // Strict alphabet and padding checks, so path-like strings fall
        // through to the filesystem branch instead of decoding to garbage.
        if let Ok(bytes) = BASE64.decode(reference) {
            tokio::fs::write(destination, &bytes).await?;
            return Ok(ResolvedAudio {
                path: destination.to_path_buf(),
                source: AudioSourceKind::Base64,
            });
        }

        let path = Path::new(reference);
        if path.exists() {
            return Ok(ResolvedAudio {
                path: path.to_path_buf(),
                source: AudioSourceKind::FilePath,
            });
        }

        Err(ResolveError::Unrecognized)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ResolveError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ResolveError::Download(e.to_string()))?
            .error_for_status()
            .map_err(|e| ResolveError::Download(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ResolveError::Download(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

/// Read an audio artifact and encode it for transport. The whole file is
/// materialized in memory; TTS outputs are small enough for that.
pub async fn encode_file_base64(path: &Path) -> std::io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(BASE64.encode(bytes))
}
