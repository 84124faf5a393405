//! Scrape endpoint: validates, then streams pipeline progress as SSE.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    Json,
};
use jobscout_core::ScrapeRequest;
use jobscout_scraper::ScrapeOrchestrator;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tracing::error;

/// `POST /scrape` - run the aggregation pipeline for one request.
///
/// Validation failures and a browser that cannot launch are reported as
/// plain JSON errors before any streaming begins. After that the response
/// is an event stream of `data: <json>` frames ending in a `complete`
/// event; a client disconnect cancels the run.
pub async fn scrape(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let plan = request.validate(&state.config.scrape.default_location)?;

    // Launch failures must surface as a synchronous 500, not mid-stream.
    state.extractor.prepare().await?;

    let orchestrator = ScrapeOrchestrator::new(
        Arc::clone(&state.extractor),
        Arc::clone(&state.enricher),
    )
    .with_enrichment_limit(state.config.enrichment.max_enriched_jobs);

    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        if let Err(err) = orchestrator.run(plan, tx).await {
            error!(%err, "scrape run aborted");
        }
    });

    let stream = ReceiverStream::new(rx).map(|event| Event::default().json_data(&event));
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
