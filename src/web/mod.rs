// ============================================================
// Layer 1: Demo Web Server
// ============================================================
// axum router over a shared, read-only DemoApp:
//
//   GET  /             page with the default sample text
//   POST /predict      form submit, page with the result
//   POST /api/predict  {"text": ...} → {"label", "probability"}
//   GET  /health       {"status", "model_loaded"}
//
// Without a model the page shows the "No model available"
// message and the JSON endpoint answers 503.
//
// Page renders re-read the dataset stats on a blocking thread.

pub mod page;

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};

use crate::application::demo_use_case::{DemoApp, DemoError, DEFAULT_SAMPLE_TEXT};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    pub label:       String,
    pub probability: f64,
}

pub fn build_router(app: Arc<DemoApp>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/predict", post(predict_form_handler))
        .route("/api/predict", post(api_predict_handler))
        .route("/health", get(health_handler))
        .with_state(app)
}

/// Bind and serve until the process is stopped.
pub async fn serve(app: Arc<DemoApp>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;
    tracing::info!("Demo listening on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(app)).await?;
    Ok(())
}

async fn current_stats(app: &Arc<DemoApp>) -> Option<BTreeMap<String, usize>> {
    let app = Arc::clone(app);
    match tokio::task::spawn_blocking(move || app.dataset_stats()).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!("Reading dataset stats failed: {e}");
            None
        }
    }
}

async fn index_handler(State(app): State<Arc<DemoApp>>) -> Html<String> {
    let stats = current_stats(&app).await;
    Html(page::render(DEFAULT_SAMPLE_TEXT, None, stats.as_ref()).into_string())
}

async fn predict_form_handler(
    State(app): State<Arc<DemoApp>>,
    Form(form): Form<PredictRequest>,
) -> Html<String> {
    let outcome = app.predict(&form.text);
    if let Err(e) = &outcome {
        tracing::warn!("Prediction failed: {e}");
    }
    let stats = current_stats(&app).await;
    Html(page::render(&form.text, Some(&outcome), stats.as_ref()).into_string())
}

async fn api_predict_handler(
    State(app): State<Arc<DemoApp>>,
    Json(req): Json<PredictRequest>,
) -> Response {
    match app.predict(&req.text) {
        Ok(p) => Json(PredictResponse {
            label:       p.label_str().to_string(),
            probability: p.probability,
        })
        .into_response(),
        Err(e) => {
            let status = match e {
                DemoError::NoModel    => StatusCode::SERVICE_UNAVAILABLE,
                DemoError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
        }
    }
}

async fn health_handler(State(app): State<Arc<DemoApp>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "model_loaded": app.has_model(),
    }))
}
