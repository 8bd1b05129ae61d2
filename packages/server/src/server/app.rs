//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::{
    FreeTierQuotaGate, MemoryPlanStore, OpenAiClient, ServerDeps,
};
use crate::pipeline::PlanGenerator;
use crate::server::routes::{generate_handler, health_handler, progress_handler};
use research::{
    BraveProvider, ResearchProvider, SearchOrchestrator, SerperProvider, SpacedProvider,
    TavilyProvider,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
    pub generator: Arc<PlanGenerator>,
}

impl AppState {
    pub fn new(deps: ServerDeps, timeout: Duration) -> Self {
        let generator = Arc::new(PlanGenerator::new(deps.clone(), timeout));
        Self { deps, generator }
    }
}

/// Build the research ladder from whichever provider keys are configured.
/// Tavily is the tier that enforces inter-call spacing, so it gets the
/// spacing wrapper.
pub fn build_searcher(config: &Config) -> anyhow::Result<SearchOrchestrator> {
    let mut providers: Vec<Arc<dyn ResearchProvider>> = Vec::new();
    if let Some(key) = &config.tavily_api_key {
        providers.push(Arc::new(SpacedProvider::new(TavilyProvider::new(
            key.clone(),
        )?)));
    }
    if let Some(key) = &config.serper_api_key {
        providers.push(Arc::new(SerperProvider::new(key.clone())?));
    }
    if let Some(key) = &config.brave_api_key {
        providers.push(Arc::new(BraveProvider::new(key.clone())?));
    }
    if providers.is_empty() {
        tracing::warn!("no search provider keys configured; research will run degraded");
    }
    Ok(SearchOrchestrator::new(providers))
}

/// Wire production dependencies from config.
pub fn build_deps(config: &Config) -> anyhow::Result<ServerDeps> {
    let ai = OpenAiClient::new(config.openai_api_key.clone())?
        .with_model(config.openai_model.clone());
    let searcher = build_searcher(config)?;
    let store = Arc::new(MemoryPlanStore::new());
    let quota = Arc::new(FreeTierQuotaGate::new(store.clone(), config.free_tier_limit));

    Ok(ServerDeps::new(
        Arc::new(ai),
        Arc::new(searcher),
        quota,
        store,
    ))
}

/// Build the axum application.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/generate", post(generate_handler))
        .route("/api/progress", get(progress_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
