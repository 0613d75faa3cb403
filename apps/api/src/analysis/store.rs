use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::models::analysis::{AnalysisRecord, AnalysisRow};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Analysis history repository. Carried in `AppState` as
/// `Arc<dyn AnalysisStore>`; the scoring engine never sees it.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Persists one record. Returns only after the record is durable.
    async fn append(&self, record: AnalysisRecord) -> Result<()>;

    /// All records for a user, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<AnalysisRecord>>;

    async fn count(&self) -> Result<usize>;

    /// Backend name for startup logs and health output.
    fn backend(&self) -> &'static str;
}

fn newest_first(records: &mut [AnalysisRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

// ────────────────────────────────────────────────────────────────────────────
// FileAnalysisStore: JSON array on disk, mirrored in memory
// ────────────────────────────────────────────────────────────────────────────

pub struct FileAnalysisStore {
    path: PathBuf,
    records: RwLock<Vec<AnalysisRecord>>,
}

impl FileAnalysisStore {
    /// Opens the store. A missing or unreadable file starts empty. A corrupt
    /// file is moved aside first so the next append cannot overwrite it.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match read_history(&path).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(records) => records,
                Err(e) => {
                    warn!("Corrupt history file {}: {e}", path.display());
                    set_aside(&path).await;
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Starting with empty analysis history: {e:#}");
                Vec::new()
            }
        };
        info!(
            "Loaded {} stored analyses from {}",
            records.len(),
            path.display()
        );
        Self {
            path,
            records: RwLock::new(records),
        }
    }
}

async fn read_history(path: &Path) -> Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Renames `analyses.json` to `analyses.json.corrupt-<timestamp>`.
async fn set_aside(path: &Path) {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S");
    let aside = path.with_extension(format!("json.corrupt-{stamp}"));
    match tokio::fs::rename(path, &aside).await {
        Ok(()) => warn!("Moved corrupt history file to {}", aside.display()),
        Err(e) => warn!(
            "Could not move corrupt history file {}: {e}",
            path.display()
        ),
    }
}

/// Writes to a sibling temp file and renames it over the target.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes)
        .await
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

#[async_trait]
impl AnalysisStore for FileAnalysisStore {
    async fn append(&self, record: AnalysisRecord) -> Result<()> {
        // Held across the write so concurrent appends serialize.
        let mut records = self.records.write().await;
        records.push(record);
        let bytes = match serde_json::to_vec_pretty(&*records) {
            Ok(bytes) => bytes,
            Err(e) => {
                records.pop();
                return Err(e).context("Failed to serialize history");
            }
        };
        if let Err(e) = write_atomic(&self.path, &bytes).await {
            records.pop();
            return Err(e);
        }
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<AnalysisRecord>> {
        let records = self.records.read().await;
        // Reverse first so equal timestamps keep the later insert on top.
        let mut matching: Vec<AnalysisRecord> = records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut matching);
        Ok(matching)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PgAnalysisStore
// ────────────────────────────────────────────────────────────────────────────

pub struct PgAnalysisStore {
    pool: PgPool,
}

impl PgAnalysisStore {
    /// Opens a pool against `database_url` and prepares the schema.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        info!("PostgreSQL connection pool established");
        Self::init(pool).await
    }

    /// Wraps the pool and creates the history table if it does not exist.
    async fn init(pool: PgPool) -> Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resume_analyses (
                id              UUID PRIMARY KEY,
                user_id         TEXT NOT NULL,
                resume_name     TEXT NOT NULL,
                job_category    TEXT NOT NULL,
                job_role        TEXT NOT NULL,
                analysis_type   TEXT NOT NULL,
                analysis_result JSONB NOT NULL,
                created_at      TIMESTAMPTZ NOT NULL,
                file_name       TEXT,
                file_mime       TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("Failed to create resume_analyses table")?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS resume_analyses_user_created \
             ON resume_analyses (user_id, created_at DESC)",
        )
        .execute(&pool)
        .await
        .context("Failed to create resume_analyses index")?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn append(&self, record: AnalysisRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resume_analyses
                (id, user_id, resume_name, job_category, job_role,
                 analysis_type, analysis_result, created_at, file_name, file_mime)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(record.id)
        .bind(&record.user_id)
        .bind(&record.resume_name)
        .bind(&record.job_category)
        .bind(&record.job_role)
        .bind(&record.analysis_type)
        .bind(sqlx::types::Json(&record.analysis_result))
        .bind(record.created_at)
        .bind(&record.file_name)
        .bind(&record.file_mime)
        .execute(&self.pool)
        .await
        .context("Failed to insert analysis")?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<AnalysisRecord>> {
        let rows: Vec<AnalysisRow> = sqlx::query_as(
            "SELECT * FROM resume_analyses WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list analyses")?;
        Ok(rows.into_iter().map(AnalysisRecord::from).collect())
    }

    async fn count(&self) -> Result<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM resume_analyses")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count analyses")?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
