use axum::{extract::State, Extension, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    domain::synthesis::{JobRequest, JobSuccess, SynthesisService, SynthesisServiceApi},
    error::{AppError, AppResult},
    infrastructure::middleware::RequestId,
};

pub struct JobController {
    synthesis_service: Arc<SynthesisService>,
}

impl JobController {
    pub fn new(synthesis_service: Arc<SynthesisService>) -> Self {
        Self { synthesis_service }
    }

    /// POST /run - process one synthesis job
    ///
    /// Returns exactly one of the success mapping `{audio, sample_rate,
    /// format}` or the error mapping `{error, traceback?}`. Field-level
    /// decode problems become the error mapping too, so the job source
    /// always gets a well-formed result back.
    pub async fn run(
        State(controller): State<Arc<JobController>>,
        Extension(request_id): Extension<RequestId>,
        Json(body): Json<Value>,
    ) -> AppResult<Json<JobSuccess>> {
        let job: JobRequest = serde_json::from_value(body)
            .map_err(|e| AppError::BadRequest(format!("invalid job payload: {e}")))?;

        tracing::info!(
            request_id = %request_id.0,
            job_id = job.id.as_deref().unwrap_or("-"),
            "Job received"
        );

        let result = controller.synthesis_service.process(job.input).await?;

        Ok(Json(result))
    }
}
