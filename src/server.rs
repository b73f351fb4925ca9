use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{SystemTime, UNIX_EPOCH},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::api::{
    ApiAnalyzeRequest, ApiAnalyzeResponse, ApiOutlookRequest, ApiOutlookResponse,
    ApiSuggestRequest, ApiSuggestResponse, ApiTierRequest,
};
use crate::snapshots::{Snapshot, SnapshotStore};
use encore_analytics::config::EngineConfig;
use encore_analytics::{analyze_entity, campaign_outlook, recommend_reinvestments};

#[derive(Clone)]
struct AppState {
    config: Arc<EngineConfig>,
    snapshots: Arc<SnapshotStore>,
}

static SNAPSHOT_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub async fn serve(args: crate::ServeArgs, config_path: Option<PathBuf>) -> Result<(), String> {
    init_tracing();

    let (config, loaded_from) = EngineConfig::load(config_path)?;
    if let Some(path) = loaded_from.filter(|path| path.exists()) {
        tracing::info!(path = %path.display(), "loaded engine config");
    }

    let snapshots = SnapshotStore::load(PathBuf::from(&args.snapshots)).await?;
    let state = AppState {
        config: Arc::new(config),
        snapshots: Arc::new(snapshots),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/outlook", post(outlook_handler))
        .route("/api/suggest", post(suggest_handler))
        .route("/api/tier", post(tier_handler))
        .route("/api/snapshots", get(list_snapshots))
        .route(
            "/api/snapshots/:snapshot_id",
            get(get_snapshot).delete(delete_snapshot),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    tracing::info!(%addr, "analytics engine listening");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiAnalyzeRequest>,
) -> Result<Json<ApiAnalyzeResponse>, (StatusCode, String)> {
    let (entity_id, age_days, population) = request
        .resolve()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let report = analyze_entity(entity_id, age_days, population, &state.config);
    tracing::info!(
        entity_id,
        viral_score = report.viral_score,
        trending_rank = report.trending_rank,
        "analyzed entity"
    );

    record_snapshot(&state, "analyze", &report).await;
    Ok(Json(ApiAnalyzeResponse::from_report(report)))
}

async fn outlook_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiOutlookRequest>,
) -> Result<Json<ApiOutlookResponse>, (StatusCode, String)> {
    let snapshot = request
        .into_snapshot()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let outlook = campaign_outlook(&snapshot, &state.config);
    tracing::info!(
        risk_score = outlook.risk_score,
        estimated_roi = outlook.estimated_roi,
        "computed campaign outlook"
    );

    Ok(Json(ApiOutlookResponse::from_outlook(outlook)))
}

async fn suggest_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiSuggestRequest>,
) -> Json<ApiSuggestResponse> {
    let mut config = (*state.config).clone();
    if let Some(cap) = request.cap {
        config.recommend.cap = cap;
    }

    let batch = recommend_reinvestments(&request.candidates, &config);
    tracing::info!(
        candidates = request.candidates.len(),
        suggested = batch.suggestions.len(),
        average_roi = batch.average_roi,
        "built reinvestment suggestions"
    );

    record_snapshot(&state, "suggest", &batch).await;
    Json(ApiSuggestResponse::from_batch(batch))
}

async fn tier_handler(Json(request): Json<ApiTierRequest>) -> impl IntoResponse {
    Json(request.evaluate())
}

async fn list_snapshots(State(state): State<AppState>) -> Json<Vec<Snapshot>> {
    Json(state.snapshots.list().await)
}

async fn get_snapshot(
    State(state): State<AppState>,
    Path(snapshot_id): Path<String>,
) -> Result<Json<Snapshot>, StatusCode> {
    state
        .snapshots
        .get(&snapshot_id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_snapshot(
    State(state): State<AppState>,
    Path(snapshot_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let removed = state
        .snapshots
        .delete(&snapshot_id)
        .await
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err))?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "snapshot not found".to_string()))
    }
}

async fn record_snapshot<T: serde::Serialize>(state: &AppState, kind: &str, payload: &T) {
    let payload = match serde_json::to_value(payload) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(kind, "failed to serialize snapshot payload: {}", err);
            return;
        }
    };

    let snapshot = Snapshot {
        id: next_snapshot_id(),
        created_at: now_secs(),
        kind: kind.to_string(),
        payload,
    };

    if let Err(err) = state.snapshots.add(snapshot).await {
        tracing::warn!(kind, "failed to persist snapshot: {}", err);
    }
}

fn next_snapshot_id() -> String {
    let counter = SNAPSHOT_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("snap-{}-{}", now_secs(), counter)
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs() as i64)
        .unwrap_or(0)
}
