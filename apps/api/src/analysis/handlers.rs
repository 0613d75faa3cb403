use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{run_analysis, AnalysisRequest, Upload, PASTED_TEXT_NAME};
use crate::errors::AppError;
use crate::models::analysis::{AnalysisRecord, NewAnalysis, DEFAULT_USER_ID, STANDARD_ANALYSIS};
use crate::scoring::AnalysisResult;
use crate::state::AppState;

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(e.body_text())
    }
}

/// POST /analyze-resume (multipart)
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut req = AnalysisRequest {
        user_id: DEFAULT_USER_ID.to_string(),
        ..AnalysisRequest::default()
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;
            // Browsers send an empty part when no file was chosen.
            if !(file_name.is_empty() && bytes.is_empty()) {
                req.upload = Some(Upload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            continue;
        }
        let value = field.text().await.map_err(multipart_error)?;
        match name.as_str() {
            "text" => req.text = Some(value),
            "job_category" => req.job_category = Some(value),
            "job_role" => req.job_role = Some(value),
            "custom_job_description" => req.job_description = Some(value),
            "user_id" if !value.trim().is_empty() => req.user_id = value,
            _ => {}
        }
    }

    Ok(Json(run_analysis(&state, req).await?))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub job_category: Option<String>,
    pub job_role: Option<String>,
    #[serde(alias = "resume_text")]
    pub text: Option<String>,
    pub custom_job_description: Option<String>,
    pub user_id: Option<String>,
}

/// POST /analyze-text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let req = AnalysisRequest {
        job_category: body.job_category,
        job_role: body.job_role,
        text: body.text,
        upload: None,
        job_description: body.custom_job_description,
        user_id: body
            .user_id
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
    };
    Ok(Json(run_analysis(&state, req).await?))
}

#[derive(Serialize)]
pub struct UserAnalysesResponse {
    pub analyses: Vec<AnalysisRecord>,
}

/// GET /user-analyses/:user_id
pub async fn handle_user_analyses(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserAnalysesResponse>, AppError> {
    let analyses = state.store.list_for_user(&user_id).await?;
    Ok(Json(UserAnalysesResponse { analyses }))
}

#[derive(Debug, Deserialize)]
pub struct StoreAnalysisRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub resume_name: Option<String>,
    pub job_category: String,
    pub job_role: String,
    #[serde(default)]
    pub analysis_type: Option<String>,
    pub analysis_result: AnalysisResult,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_mime: Option<String>,
}

#[derive(Serialize)]
pub struct StoreAnalysisResponse {
    pub id: Uuid,
    pub message: String,
}

/// POST /store-analysis
pub async fn handle_store_analysis(
    State(state): State<AppState>,
    Json(body): Json<StoreAnalysisRequest>,
) -> Result<Json<StoreAnalysisResponse>, AppError> {
    let record = NewAnalysis {
        user_id: body.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
        resume_name: body
            .resume_name
            .unwrap_or_else(|| PASTED_TEXT_NAME.to_string()),
        job_category: body.job_category,
        job_role: body.job_role,
        analysis_type: body
            .analysis_type
            .unwrap_or_else(|| STANDARD_ANALYSIS.to_string()),
        analysis_result: body.analysis_result,
        file_name: body.file_name,
        file_mime: body.file_mime,
    }
    .into_record();
    let id = record.id;
    state.store.append(record).await?;
    Ok(Json(StoreAnalysisResponse {
        id,
        message: "Analysis stored successfully".to_string(),
    }))
}
