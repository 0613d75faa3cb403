use std::sync::Arc;

use crate::analysis::store::AnalysisStore;
use crate::catalog::Taxonomy;
use crate::config::Config;
use crate::feedback::FeedbackMailer;
use crate::jobs::JobBoard;
use crate::scoring::ScoringEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only skill taxonomy loaded at startup.
    pub taxonomy: Arc<Taxonomy>,
    /// Stateless scorer; holds the alias table and tuning constants.
    pub engine: Arc<ScoringEngine>,
    /// Analysis history. File-backed by default, Postgres when DATABASE_URL is set.
    pub store: Arc<dyn AnalysisStore>,
    pub jobs: JobBoard,
    /// Present only when a mail API is configured.
    pub mailer: Option<FeedbackMailer>,
}
