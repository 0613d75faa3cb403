use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::feedback::MailSettings;
use crate::scoring::params::{MatchParams, ScoringParams};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Adzuna credentials; live job search is enabled only when both are set.
#[derive(Debug, Clone)]
pub struct AdzunaSettings {
    pub app_id: String,
    pub api_key: String,
    pub country: String,
}

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub roles_dataset_path: PathBuf,
    pub skill_aliases_path: PathBuf,
    pub database_url: Option<String>,
    pub analyses_path: PathBuf,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub scoring: ScoringParams,
    pub adzuna: Option<AdzunaSettings>,
    pub mail: Option<MailSettings>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            roles_dataset_path: data_dir.join("roles.json"),
            skill_aliases_path: data_dir.join("aliases.json"),
            database_url: None,
            analyses_path: PathBuf::from("storage/analyses.json"),
            allowed_origins: Vec::new(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            scoring: ScoringParams::default(),
            adzuna: None,
            mail: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();
        let match_defaults = MatchParams::default();

        let matching = MatchParams {
            fuzzy_similarity_threshold: parse_or(
                &get,
                "FUZZY_SIMILARITY_THRESHOLD",
                match_defaults.fuzzy_similarity_threshold,
            )?,
            fuzzy_min_length: parse_or(&get, "FUZZY_MIN_LENGTH", match_defaults.fuzzy_min_length)?,
            max_match_chars: parse_or(&get, "MAX_MATCH_CHARS", match_defaults.max_match_chars)?,
            ..match_defaults
        };

        let adzuna = match (get("ADZUNA_APP_ID"), get("ADZUNA_API_KEY")) {
            (Some(app_id), Some(api_key)) => Some(AdzunaSettings {
                app_id,
                api_key,
                country: get("ADZUNA_COUNTRY").unwrap_or_else(|| "us".to_string()),
            }),
            _ => None,
        };

        let mail = match (
            get("MAIL_API_URL"),
            get("MAIL_API_KEY"),
            get("FEEDBACK_RECIPIENT"),
        ) {
            (Some(api_url), Some(api_key), Some(recipient)) => Some(MailSettings {
                api_url,
                api_key,
                from: get("MAIL_FROM")
                    .unwrap_or_else(|| "Resume Analyzer <noreply@localhost>".to_string()),
                recipient,
            }),
            _ => None,
        };

        Ok(Config {
            port: parse_or(&get, "PORT", defaults.port)?,
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            roles_dataset_path: get("ROLES_DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.roles_dataset_path),
            skill_aliases_path: get("SKILL_ALIASES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.skill_aliases_path),
            database_url: get("DATABASE_URL"),
            analyses_path: get("ANALYSES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.analyses_path),
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            scoring: ScoringParams {
                matching,
                ..defaults.scoring
            },
            adzuna,
            mail,
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

/// Comma-separated origins; `*` alone means any origin.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect();
    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}
