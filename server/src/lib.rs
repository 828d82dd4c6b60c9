use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use engine::catalog::{load_catalog, sample_catalog};
use engine::{recommend_scored, CorpusHandle, EngineConfig, EngineError, NewDocument, DEFAULT_K};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Startup settings for the HTTP layer.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Catalog file or directory; the demo catalog when `None`.
    pub catalog: Option<PathBuf>,
    pub engine: EngineConfig,
    pub default_k: usize,
    /// Required in `X-ADMIN-TOKEN` for rebuilds. Rebuilds are refused when unset.
    pub admin_token: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { catalog: None, engine: EngineConfig::default(), default_k: DEFAULT_K, admin_token: None }
    }
}

#[derive(Deserialize)]
pub struct RecommendRequest {
    pub movie: String,
    #[serde(default)]
    pub k: Option<i64>,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<String>,
    pub scores: Vec<f32>,
    pub generation: u64,
}

#[derive(Serialize)]
pub struct RebuildResponse {
    pub documents: usize,
    pub vocabulary: usize,
    pub generation: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<CorpusHandle>,
    pub engine: EngineConfig,
    pub default_k: usize,
    pub admin_token: Option<String>,
}

/// Engine errors rendered as `{"error": ...}` with a matching status.
pub struct ApiError(StatusCode, String);

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        let status = match &e {
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::InvalidArgument(_) | EngineError::Catalog(_) => StatusCode::BAD_REQUEST,
            EngineError::InvalidCorpus(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        ApiError(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

pub fn build_app(settings: AppSettings) -> Result<Router> {
    // Build the first snapshot at startup
    let docs = match &settings.catalog {
        Some(path) => load_catalog(path)?,
        None => sample_catalog(),
    };
    let corpus = Arc::new(CorpusHandle::build(docs, &settings.engine)?);
    let app_state = AppState {
        corpus,
        engine: settings.engine,
        default_k: settings.default_k,
        admin_token: settings.admin_token,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/recommend", post(recommend_handler))
        .route("/titles", get(titles_handler))
        .route("/admin/rebuild", post(rebuild_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let snapshot = state.corpus.snapshot();
    let k = req.k.unwrap_or(state.default_k as i64);
    let recs = recommend_scored(&snapshot.corpus, &req.movie, k)?;
    tracing::debug!(movie = %req.movie, k, hits = recs.len(), "recommend");
    let (recommendations, scores): (Vec<String>, Vec<f32>) = recs.into_iter().map(|r| (r.title, r.score)).unzip();
    Ok(Json(RecommendResponse { recommendations, scores, generation: snapshot.generation }))
}

pub async fn titles_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.corpus.snapshot();
    let titles: Vec<&str> = snapshot.corpus.titles().collect();
    Json(serde_json::json!({ "titles": titles }))
}

async fn rebuild_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(docs): Json<Vec<NewDocument>>,
) -> Result<Json<RebuildResponse>, ApiError> {
    authorize(&state, &headers)?;
    let handle = state.corpus.clone();
    let config = state.engine.clone();
    // building is CPU-bound; keep it off the async workers
    let published = tokio::task::spawn_blocking(move || handle.rebuild(docs, &config))
        .await
        .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))??;
    Ok(Json(RebuildResponse {
        documents: published.corpus.len(),
        vocabulary: published.corpus.vocabulary().len(),
        generation: published.generation,
    }))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err(ApiError(StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err(ApiError(StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
