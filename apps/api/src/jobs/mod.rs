//! Job board: live search through Adzuna when configured, with a built-in
//! listing as the fallback.

pub mod adzuna;
pub mod handlers;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::jobs::adzuna::AdzunaClient;

pub const PAGE_SIZE: usize = 10;
pub const DEFAULT_KEYWORD: &str = "software engineer";
pub const DEFAULT_LOCATION: &str = "us";
pub const DEFAULT_JOB_TYPE: &str = "full_time";

const MOCK_SOURCE: &str = "Mock Data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub job_type: String,
    pub description: String,
    pub landing_page: String,
    pub created: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub posting: JobPosting,
    pub how_to_apply: String,
    pub company_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobQuery {
    pub page: Option<usize>,
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
}

impl JobQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(0)
    }

    pub fn keyword(&self) -> &str {
        non_blank(self.keyword.as_deref()).unwrap_or(DEFAULT_KEYWORD)
    }

    pub fn location(&self) -> &str {
        non_blank(self.location.as_deref()).unwrap_or(DEFAULT_LOCATION)
    }

    pub fn job_type(&self) -> &str {
        non_blank(self.job_type.as_deref()).unwrap_or(DEFAULT_JOB_TYPE)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<JobPosting>,
    pub page_count: usize,
    pub total_jobs: usize,
    pub source: String,
}

pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// `120000.0` → `"120,000"`.
pub fn format_thousands(value: f64) -> String {
    let digits = (value.max(0.0).round() as u64).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

struct MockJob {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    salary: &'static str,
    description: &'static str,
    created: &'static str,
}

const MOCK_JOBS: &[MockJob] = &[
    MockJob {
        id: "1",
        title: "Senior Software Engineer",
        company: "TechCorp Inc.",
        location: "San Francisco, CA",
        salary: "$120,000 - $150,000",
        description: "We are looking for a senior software engineer to join our platform team and own services end to end.",
        created: "2024-01-15T10:00:00Z",
    },
    MockJob {
        id: "2",
        title: "Frontend Developer",
        company: "StartupXYZ",
        location: "Remote",
        salary: "$90,000 - $110,000",
        description: "Join our frontend team to build accessible, responsive user experiences in React and TypeScript.",
        created: "2024-01-14T15:30:00Z",
    },
    MockJob {
        id: "3",
        title: "Backend Developer",
        company: "DataFlow Systems",
        location: "New York, NY",
        salary: "$100,000 - $130,000",
        description: "Build scalable backend systems and REST APIs for our data platform.",
        created: "2024-01-13T09:15:00Z",
    },
    MockJob {
        id: "4",
        title: "Full Stack Developer",
        company: "InnovateTech",
        location: "Austin, TX",
        salary: "$95,000 - $125,000",
        description: "Work on both frontend and backend development across our product suite.",
        created: "2024-01-12T14:45:00Z",
    },
    MockJob {
        id: "5",
        title: "Data Scientist",
        company: "Analytics Pro",
        location: "Seattle, WA",
        salary: "$110,000 - $140,000",
        description: "Apply machine learning and statistical analysis to customer behaviour data.",
        created: "2024-01-11T11:20:00Z",
    },
    MockJob {
        id: "6",
        title: "DevOps Engineer",
        company: "CloudScale",
        location: "Denver, CO",
        salary: "$105,000 - $135,000",
        description: "Run Kubernetes clusters, CI/CD pipelines and infrastructure as code with Terraform.",
        created: "2024-01-10T08:00:00Z",
    },
];

impl MockJob {
    fn posting(&self) -> JobPosting {
        JobPosting {
            id: self.id.to_string(),
            title: self.title.to_string(),
            company: self.company.to_string(),
            location: self.location.to_string(),
            salary: self.salary.to_string(),
            job_type: DEFAULT_JOB_TYPE.to_string(),
            description: self.description.to_string(),
            landing_page: format!("https://example.com/job/{}", self.id),
            created: self.created.to_string(),
        }
    }
}

/// Filters the built-in listing by keyword and returns one page of it.
/// The default keyword matches everything.
pub fn mock_search(query: &JobQuery) -> JobSearchResponse {
    let keyword = query.keyword().to_lowercase();
    let filtered: Vec<JobPosting> = MOCK_JOBS
        .iter()
        .filter(|job| {
            keyword == DEFAULT_KEYWORD
                || job.title.to_lowercase().contains(&keyword)
                || job.description.to_lowercase().contains(&keyword)
        })
        .map(MockJob::posting)
        .collect();
    let total_jobs = filtered.len();
    let jobs = filtered
        .into_iter()
        .skip(query.page().saturating_mul(PAGE_SIZE))
        .take(PAGE_SIZE)
        .collect();
    JobSearchResponse {
        jobs,
        page_count: page_count(total_jobs),
        total_jobs,
        source: MOCK_SOURCE.to_string(),
    }
}

pub fn mock_detail(job_id: &str) -> Option<JobDetail> {
    MOCK_JOBS.iter().find(|job| job.id == job_id).map(|job| JobDetail {
        posting: job.posting(),
        how_to_apply: "Please visit the company's careers page to apply for this position."
            .to_string(),
        company_url: "https://example.com/careers".to_string(),
    })
}

/// Search front door shared through `AppState`.
#[derive(Clone, Default)]
pub struct JobBoard {
    live: Option<AdzunaClient>,
}

impl JobBoard {
    pub fn new(live: Option<AdzunaClient>) -> Self {
        Self { live }
    }

    pub fn source_name(&self) -> &'static str {
        if self.live.is_some() {
            "adzuna"
        } else {
            "mock"
        }
    }

    pub async fn search(&self, query: &JobQuery) -> JobSearchResponse {
        if let Some(client) = &self.live {
            match client.search(query).await {
                Ok(response) => return response,
                Err(e) => warn!("Adzuna search failed, serving built-in listing: {e:#}"),
            }
        }
        mock_search(query)
    }
}
