use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::jobs::{
    format_thousands, page_count, JobPosting, JobQuery, JobSearchResponse, DEFAULT_JOB_TYPE,
    DEFAULT_LOCATION, PAGE_SIZE,
};

const ADZUNA_API_URL: &str = "https://api.adzuna.com/v1/api/jobs";
const SOURCE: &str = "Adzuna API";

#[derive(Debug, Deserialize)]
struct SearchResults {
    #[serde(default)]
    results: Vec<AdzunaJob>,
    #[serde(default)]
    count: usize,
}

#[derive(Debug, Deserialize)]
struct AdzunaJob {
    id: Option<String>,
    title: Option<String>,
    company: Option<DisplayName>,
    location: Option<DisplayName>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    description: Option<String>,
    redirect_url: Option<String>,
    created: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DisplayName {
    display_name: Option<String>,
}

fn display_name(field: Option<DisplayName>) -> Option<String> {
    field.and_then(|d| d.display_name)
}

#[derive(Clone)]
pub struct AdzunaClient {
    client: Client,
    app_id: String,
    api_key: String,
    country: String,
    base_url: String,
}

impl AdzunaClient {
    pub fn new(app_id: String, api_key: String, country: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build Adzuna HTTP client")?;
        Ok(Self {
            client,
            app_id,
            api_key,
            country,
            base_url: ADZUNA_API_URL.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// One page of live results, mapped onto our posting shape.
    pub async fn search(&self, query: &JobQuery) -> Result<JobSearchResponse> {
        let page = query.page();
        let job_type = query.job_type();
        // Adzuna pages are 1-based; fallback ids continue across pages
        let first_id = page
            .checked_mul(PAGE_SIZE)
            .and_then(|n| n.checked_add(1))
            .with_context(|| format!("Page {page} is out of range"))?;
        let url = format!("{}/{}/search/{}", self.base_url, self.country, page + 1);

        let mut params: Vec<(&str, String)> = vec![
            ("app_id", self.app_id.clone()),
            ("app_key", self.api_key.clone()),
            ("results_per_page", PAGE_SIZE.to_string()),
            ("what", query.keyword().to_string()),
            ("content-type", "application/json".to_string()),
        ];
        if job_type != DEFAULT_JOB_TYPE {
            params.push(("employment_type", job_type.to_string()));
        }
        if query.location() != DEFAULT_LOCATION {
            params.push(("where", query.location().to_string()));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("Adzuna request failed")?;
        let status = response.status();
        if !status.is_success() {
            bail!("Adzuna API returned {status}");
        }
        let data: SearchResults = response
            .json()
            .await
            .context("Unexpected Adzuna response body")?;
        debug!(
            "Adzuna returned {} of {} results",
            data.results.len(),
            data.count
        );

        let jobs = data
            .results
            .into_iter()
            .enumerate()
            .map(|(i, job)| posting(job, first_id.saturating_add(i), job_type))
            .collect();
        Ok(JobSearchResponse {
            jobs,
            page_count: page_count(data.count),
            total_jobs: data.count,
            source: SOURCE.to_string(),
        })
    }
}

fn posting(job: AdzunaJob, fallback_id: usize, job_type: &str) -> JobPosting {
    let salary = match (job.salary_min, job.salary_max) {
        (Some(min), Some(max)) => format!("${} - ${}", format_thousands(min), format_thousands(max)),
        _ => "Salary not specified".to_string(),
    };
    JobPosting {
        id: job.id.unwrap_or_else(|| fallback_id.to_string()),
        title: job.title.unwrap_or_else(|| "Software Engineer".to_string()),
        company: display_name(job.company).unwrap_or_else(|| "Company".to_string()),
        location: display_name(job.location).unwrap_or_else(|| "Remote".to_string()),
        salary,
        job_type: job_type.to_string(),
        description: job
            .description
            .unwrap_or_else(|| "Job description not available".to_string()),
        landing_page: job.redirect_url.unwrap_or_else(|| "#".to_string()),
        created: job.created.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn fake_search(
        Path((country, page)): Path<(String, u32)>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Json<Value>, StatusCode> {
        if params.get("app_key").map(String::as_str) != Some("secret") {
            return Err(StatusCode::UNAUTHORIZED);
        }
        assert_eq!(country, "gb");
        assert_eq!(page, 2);
        assert_eq!(params["what"], "rust");
        assert_eq!(params["employment_type"], "contract");
        assert_eq!(params["where"], "London");
        Ok(Json(json!({
            "count": 23,
            "results": [
                {
                    "id": "4411",
                    "title": "Rust Engineer",
                    "company": {"display_name": "Ferrous Ltd"},
                    "location": {"display_name": "London"},
                    "salary_min": 65000.0,
                    "salary_max": 85000.0,
                    "redirect_url": "https://example.com/4411",
                    "created": "2024-02-01T00:00:00Z"
                },
                {"title": "Systems Programmer"}
            ]
        })))
    }

    async fn spawn_fake_adzuna() -> String {
        let app = Router::new().route("/:country/search/:page", get(fake_search));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn query() -> JobQuery {
        JobQuery {
            page: Some(1),
            keyword: Some("rust".to_string()),
            location: Some("London".to_string()),
            job_type: Some("contract".to_string()),
        }
    }

    #[tokio::test]
    async fn test_search_maps_results() {
        let base = spawn_fake_adzuna().await;
        let client = AdzunaClient::new("id".into(), "secret".into(), "gb".into())
            .unwrap()
            .with_base_url(base);
        let r = client.search(&query()).await.unwrap();

        assert_eq!(r.source, "Adzuna API");
        assert_eq!(r.total_jobs, 23);
        assert_eq!(r.page_count, 3);
        assert_eq!(r.jobs[0].salary, "$65,000 - $85,000");
        assert_eq!(r.jobs[0].company, "Ferrous Ltd");
        assert_eq!(r.jobs[0].job_type, "contract");
        // second result falls back on every missing field
        assert_eq!(r.jobs[1].id, "12");
        assert_eq!(r.jobs[1].salary, "Salary not specified");
        assert_eq!(r.jobs[1].company, "Company");
        assert_eq!(r.jobs[1].landing_page, "#");
    }

    #[tokio::test]
    async fn test_provider_error_is_reported() {
        let base = spawn_fake_adzuna().await;
        let client = AdzunaClient::new("id".into(), "wrong".into(), "gb".into())
            .unwrap()
            .with_base_url(base);
        assert!(client.search(&query()).await.is_err());
    }

    #[tokio::test]
    async fn test_oversized_page_is_an_error() {
        let client = AdzunaClient::new("id".into(), "secret".into(), "gb".into())
            .unwrap()
            .with_base_url("http://127.0.0.1:1");
        let huge = JobQuery {
            page: Some(usize::MAX),
            ..JobQuery::default()
        };
        assert!(client.search(&huge).await.is_err());

        let board = crate::jobs::JobBoard::new(Some(client));
        let r = board.search(&huge).await;
        assert_eq!(r.source, "Mock Data");
        assert!(r.jobs.is_empty());
    }

    #[tokio::test]
    async fn test_board_falls_back_to_mock_on_provider_error() {
        let base = spawn_fake_adzuna().await;
        let client = AdzunaClient::new("id".into(), "wrong".into(), "gb".into())
            .unwrap()
            .with_base_url(base);
        let board = crate::jobs::JobBoard::new(Some(client));
        let r = board.search(&JobQuery::default()).await;
        assert_eq!(r.source, "Mock Data");
    }
}
