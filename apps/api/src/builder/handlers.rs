use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::builder::{attachment_file_name, render_markdown, ResumeForm};
use crate::errors::AppError;

/// POST /build-resume
/// Returns the rendered resume as a Markdown attachment.
pub async fn handle_build_resume(Json(form): Json<ResumeForm>) -> Result<Response, AppError> {
    form.validate()?;
    let markdown = render_markdown(&form);
    let file_name = attachment_file_name(&form.personal_info.full_name);
    info!("Built resume '{file_name}' ({} bytes)", markdown.len());

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/markdown; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        markdown,
    )
        .into_response())
}
