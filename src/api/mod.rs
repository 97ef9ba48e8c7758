//! HTTP layer exposing text analysis and questionnaire scoring.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{config::Settings, model::PredictiveModel, nlp::SymptomExtractor};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub extractor: &'static SymptomExtractor,
    pub model: Arc<PredictiveModel>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let model = Arc::new(PredictiveModel::new(&settings));
        Self {
            settings,
            extractor: SymptomExtractor::shared(),
            model,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/processText", post(routes::process_text))
        .route("/computeDASS", post(routes::compute_dass))
        .route("/questions", get(routes::list_questions))
        .route("/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    crate::scoring::severity::validate_builtin()?;
    let state = AppState::new(settings);
    // Build the keyword tables before the first request arrives.
    let categories = state.extractor.index().iter().count();
    info!(
        categories,
        model_dir = %state.settings.model_dir.display(),
        "symptom extractor ready"
    );

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving dass-screen API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
