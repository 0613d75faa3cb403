use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::scoring::AnalysisResult;

pub const DEFAULT_USER_ID: &str = "default_user";
pub const STANDARD_ANALYSIS: &str = "standard";

/// One stored analysis in a user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub user_id: String,
    pub resume_name: String,
    pub job_category: String,
    pub job_role: String,
    pub analysis_type: String,
    pub analysis_result: AnalysisResult,
    pub created_at: DateTime<Utc>,
    pub file_name: Option<String>,
    pub file_mime: Option<String>,
}

/// Fields supplied by the caller; id and timestamp are assigned on creation.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub user_id: String,
    pub resume_name: String,
    pub job_category: String,
    pub job_role: String,
    pub analysis_type: String,
    pub analysis_result: AnalysisResult,
    pub file_name: Option<String>,
    pub file_mime: Option<String>,
}

impl NewAnalysis {
    pub fn into_record(self) -> AnalysisRecord {
        AnalysisRecord {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            resume_name: self.resume_name,
            job_category: self.job_category,
            job_role: self.job_role,
            analysis_type: self.analysis_type,
            analysis_result: self.analysis_result,
            created_at: Utc::now(),
            file_name: self.file_name,
            file_mime: self.file_mime,
        }
    }
}

/// Row shape of the `resume_analyses` table.
#[derive(Debug, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: String,
    pub resume_name: String,
    pub job_category: String,
    pub job_role: String,
    pub analysis_type: String,
    pub analysis_result: Json<AnalysisResult>,
    pub created_at: DateTime<Utc>,
    pub file_name: Option<String>,
    pub file_mime: Option<String>,
}

impl From<AnalysisRow> for AnalysisRecord {
    fn from(row: AnalysisRow) -> Self {
        AnalysisRecord {
            id: row.id,
            user_id: row.user_id,
            resume_name: row.resume_name,
            job_category: row.job_category,
            job_role: row.job_role,
            analysis_type: row.analysis_type,
            analysis_result: row.analysis_result.0,
            created_at: row.created_at,
            file_name: row.file_name,
            file_mime: row.file_mime,
        }
    }
}
