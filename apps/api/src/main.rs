mod analysis;
mod builder;
mod catalog;
mod config;
mod errors;
mod extract;
mod feedback;
mod jobs;
mod models;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::store::{AnalysisStore, FileAnalysisStore, PgAnalysisStore};
use crate::catalog::Taxonomy;
use crate::config::Config;
use crate::feedback::FeedbackMailer;
use crate::jobs::adzuna::AdzunaClient;
use crate::jobs::JobBoard;
use crate::routes::build_router;
use crate::scoring::aliases::AliasTable;
use crate::scoring::ScoringEngine;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Datasets: a bad file degrades to empty data rather than aborting startup
    let taxonomy = Taxonomy::load(&config.roles_dataset_path).unwrap_or_else(|e| {
        warn!("Skill taxonomy unavailable, serving empty catalog: {e:#}");
        Taxonomy::default()
    });
    info!(
        "Skill taxonomy: {} categories, {} roles",
        taxonomy.categories().len(),
        taxonomy.role_count()
    );

    let aliases = AliasTable::load(&config.skill_aliases_path).unwrap_or_else(|e| {
        warn!("Skill aliases unavailable, matching canonical names only: {e:#}");
        AliasTable::default()
    });
    let engine = ScoringEngine::new(aliases, config.scoring.clone());
    if engine.aliases().is_empty() {
        warn!("Alias table is empty; only exact skill names will match");
    } else {
        info!("Alias table: {} skills", engine.aliases().len());
    }

    // History store: Postgres when configured, JSON file otherwise
    let store: Arc<dyn AnalysisStore> = match &config.database_url {
        Some(url) => Arc::new(PgAnalysisStore::connect(url).await?),
        None => Arc::new(FileAnalysisStore::open(&config.analyses_path).await),
    };
    info!("Analysis history backend: {}", store.backend());

    let live_jobs = match &config.adzuna {
        Some(a) => Some(AdzunaClient::new(
            a.app_id.clone(),
            a.api_key.clone(),
            a.country.clone(),
        )?),
        None => None,
    };
    let jobs = JobBoard::new(live_jobs);
    info!("Job board source: {}", jobs.source_name());

    let mailer = config.mail.clone().map(FeedbackMailer::new).transpose()?;
    if mailer.is_none() {
        info!("No mail API configured; feedback is logged only");
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        taxonomy: Arc::new(taxonomy),
        engine: Arc::new(engine),
        store,
        jobs,
        mailer,
    };

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
