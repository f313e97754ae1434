use crate::config::Config;
use crate::error::AppError;
use crate::evaluator::{EvaluationRequest, EvaluationResponse, Evaluator};
use axum::{
    extract::State,
    response::Html,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Arc<Config>,
    pub evaluator: Arc<Evaluator>,
}

const INDEX_HTML: &str = include_str!("../assets/index.html");

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", axum::routing::get(handle_index))
        .route("/api/evaluate", axum::routing::post(handle_evaluate))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[instrument(skip(state, request))]
async fn handle_evaluate(
    State(state): State<SharedState>,
    Json(request): Json<EvaluationRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    info!(url = %request.url, "Evaluation request received");

    // Host is parsed for the log line only; the URL itself is forwarded as-is.
    if let Some(host) = extract_host(&request.url) {
        debug!(target_host = %host, model = %state.config.model.name, "Dispatching evaluation");
    }

    let answer = state.evaluator.evaluate(&request).await?;

    info!(url = %request.url, "Evaluation complete");

    Ok(Json(EvaluationResponse {
        id: format!("eval-{}", uuid::Uuid::new_v4()),
        model: state.config.model.name.clone(),
        answer,
        evaluated_at: chrono::Utc::now(),
    }))
}

fn extract_host(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|s| s.to_string()))
}
