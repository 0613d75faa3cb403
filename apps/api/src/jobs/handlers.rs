use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::AppError;
use crate::jobs::{mock_detail, JobDetail, JobQuery, JobSearchResponse};
use crate::state::AppState;

/// GET /api/jobs
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Json<JobSearchResponse> {
    Json(state.jobs.search(&query).await)
}

/// GET /api/jobs/:job_id
pub async fn handle_job_detail(Path(job_id): Path<String>) -> Result<Json<JobDetail>, AppError> {
    mock_detail(&job_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}
