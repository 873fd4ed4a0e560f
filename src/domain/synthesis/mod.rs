pub mod dto;
pub mod error;
pub mod request;
pub mod service;

pub use dto::{JobInput, JobRequest, JobSuccess, OUTPUT_FORMAT, OUTPUT_SAMPLE_RATE};
pub use error::SynthesisServiceError;
pub use request::SynthesisRequest;
pub use service::{SynthesisService, SynthesisServiceApi};
