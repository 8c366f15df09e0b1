use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    api,
    comparison::{DifferenceEngine, SubjectMatcher},
    config::AppConfig,
    middleware::assign_trace_id,
    repo,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub matcher: SubjectMatcher,
    pub engine: DifferenceEngine,
}

pub async fn build_router(config: &AppConfig) -> anyhow::Result<Router> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.db.url)
        .await?;

    repo::migrations::ensure_schema(&pool).await?;

    tracing::info!(
        min_word_length = config.comparison.min_word_length,
        ngram_length = config.comparison.ngram_length,
        word_threshold = config.comparison.word_threshold,
        sensitivity = config.comparison.sensitivity,
        "comparison settings loaded"
    );

    let state = AppState {
        pool,
        matcher: SubjectMatcher::new(config.comparison),
        engine: DifferenceEngine::new(config.comparison),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(assign_trace_id));

    let api_routes = Router::new()
        .route("/subjects", get(api::subjects::list_subjects))
        .route("/subjects/similar", post(api::subjects::similar_subjects))
        .route("/specialties", get(api::specialties::list_specialties))
        .route("/faculties", get(api::specialties::list_faculties))
        .route("/degrees", get(api::specialties::list_degrees))
        .route("/rules", get(api::upload::list_rules))
        .route("/plans", get(api::plans::list_plan))
        .route("/academ", get(api::academ::academ_difference))
        .route("/upload/parse", post(api::upload::parse_upload))
        .route("/upload/items", post(api::upload::commit_upload))
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(api::health::health_check))
        .nest("/api", api_routes)
        .layer(middleware)
        .with_state(state);

    Ok(router)
}
