//! HTTP trigger surface
//!
//! `POST /scrape` synchronously runs one cycle through the watcher's
//! single-flight guard and answers with a plain-text acknowledgment;
//! `GET /healthz` is a liveness probe.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use tracing::error;

use crate::application::watcher::AdWatcher;

pub fn router(watcher: Arc<AdWatcher>) -> Router {
    Router::new()
        .route("/scrape", post(trigger_scrape))
        .route("/healthz", get(healthz))
        .with_state(watcher)
}

async fn trigger_scrape(State(watcher): State<Arc<AdWatcher>>) -> (StatusCode, String) {
    match watcher.run_cycle().await {
        Ok(report) => (
            StatusCode::OK,
            format!(
                "cycle complete: {} ads extracted, {} new\n",
                report.extracted, report.new
            ),
        ),
        Err(e) => {
            error!("triggered cycle failed: {e}");
            (StatusCode::BAD_GATEWAY, format!("cycle failed: {e}\n"))
        }
    }
}

async fn healthz() -> &'static str {
    "ok\n"
}
