//! Analysis pipeline: validate → extract → score → record.
//!
//! Both HTTP entry points (multipart upload and JSON text) funnel into
//! [`run_analysis`]. Extraction and scoring are CPU-bound and run on the
//! blocking pool; the history append happens afterwards and never fails the
//! request.

pub mod handlers;
pub mod store;

use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::models::analysis::{NewAnalysis, STANDARD_ANALYSIS};
use crate::scoring::{AnalysisResult, ResumeInput};
use crate::state::AppState;

pub const PASTED_TEXT_NAME: &str = "Pasted Text";

#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub job_category: Option<String>,
    pub job_role: Option<String>,
    pub text: Option<String>,
    pub upload: Option<Upload>,
    pub job_description: Option<String>,
    pub user_id: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

enum Source {
    Pasted(String),
    File(Bytes, String),
}

pub async fn run_analysis(
    state: &AppState,
    req: AnalysisRequest,
) -> Result<AnalysisResult, AppError> {
    let (Some(category), Some(role)) = (non_blank(req.job_category), non_blank(req.job_role))
    else {
        return Err(AppError::Validation(
            "job_category and job_role are required".to_string(),
        ));
    };
    let skills = state
        .taxonomy
        .skills(&category, &role)
        .ok_or_else(|| {
            AppError::Validation(format!("Unknown job role '{role}' in category '{category}'"))
        })?
        .to_vec();

    let raw_len = req.upload.as_ref().map_or(0, |u| u.bytes.len());
    let (file_name, file_mime) = match &req.upload {
        Some(u) => (Some(u.file_name.clone()), u.content_type.clone()),
        None => (None, None),
    };
    let source = match (non_blank(req.text), req.upload) {
        (Some(text), _) => Source::Pasted(text.trim().to_string()),
        (None, Some(upload)) => Source::File(upload.bytes, upload.file_name),
        (None, None) => {
            return Err(AppError::Validation(
                "Provide a resume file or non-empty text".to_string(),
            ))
        }
    };
    let resume_name = file_name
        .clone()
        .unwrap_or_else(|| PASTED_TEXT_NAME.to_string());
    let job_description = non_blank(req.job_description);

    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || {
        let text = match source {
            Source::Pasted(text) => text,
            Source::File(bytes, name) => extract_text(&bytes, &name),
        };
        let input = ResumeInput::text(&text, &skills)
            .with_raw_len(raw_len)
            .with_job_description(job_description.as_deref());
        engine.score(&input)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    info!(
        "Analyzed '{resume_name}' for {category}/{role}: ats_score={}",
        result.ats_score
    );

    let record = NewAnalysis {
        user_id: req.user_id,
        resume_name,
        job_category: category,
        job_role: role,
        analysis_type: STANDARD_ANALYSIS.to_string(),
        analysis_result: result.clone(),
        file_name,
        file_mime,
    }
    .into_record();
    if let Err(e) = state.store.append(record).await {
        warn!("Failed to persist analysis history: {e:#}");
    }

    Ok(result)
}
