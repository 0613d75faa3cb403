use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::Taxonomy;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[derive(Deserialize)]
pub struct RolesQuery {
    pub category: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum RolesResponse {
    /// Whole taxonomy, nested.
    All(Taxonomy),
    Category { category: String, roles: Vec<String> },
}

#[derive(Deserialize)]
pub struct SkillsQuery {
    pub category: Option<String>,
    pub role: Option<String>,
}

#[derive(Serialize)]
pub struct SkillsResponse {
    pub category: String,
    pub role: String,
    pub skills: Vec<String>,
}

/// GET /job-categories
pub async fn handle_job_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let categories = state
        .taxonomy
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(CategoriesResponse { categories })
}

/// GET /job-roles[?category=C]
pub async fn handle_job_roles(
    State(state): State<AppState>,
    Query(params): Query<RolesQuery>,
) -> Json<RolesResponse> {
    match params.category {
        Some(category) => {
            let roles = state
                .taxonomy
                .roles(&category)
                .into_iter()
                .map(str::to_string)
                .collect();
            Json(RolesResponse::Category { category, roles })
        }
        None => Json(RolesResponse::All(state.taxonomy.as_ref().clone())),
    }
}

/// GET /job-skills?category=C&role=R
pub async fn handle_job_skills(
    State(state): State<AppState>,
    Query(params): Query<SkillsQuery>,
) -> Result<Json<SkillsResponse>, AppError> {
    let (Some(category), Some(role)) = (params.category, params.role) else {
        return Err(AppError::Validation(
            "Both 'category' and 'role' query parameters are required".to_string(),
        ));
    };
    let skills = state
        .taxonomy
        .skills(&category, &role)
        .ok_or_else(|| AppError::NotFound(format!("Role '{role}' not found in '{category}'")))?
        .to_vec();
    Ok(Json(SkillsResponse {
        category,
        role,
        skills,
    }))
}
