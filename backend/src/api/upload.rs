use axum::{extract::State, Json};

use crate::{
    app::AppState,
    error::AppResult,
    model::{RuleOut, UploadCommitOut, UploadCommitPayload, UploadParseOut, UploadParsePayload},
    service,
};

pub async fn list_rules(State(state): State<AppState>) -> AppResult<Json<Vec<RuleOut>>> {
    let rules = service::upload::list_rules(&state.pool).await?;
    Ok(Json(rules))
}

pub async fn parse_upload(
    State(state): State<AppState>,
    Json(payload): Json<UploadParsePayload>,
) -> AppResult<Json<UploadParseOut>> {
    let parsed = service::upload::parse(&state.pool, &state.matcher, payload).await?;
    Ok(Json(parsed))
}

pub async fn commit_upload(
    State(state): State<AppState>,
    Json(payload): Json<UploadCommitPayload>,
) -> AppResult<Json<UploadCommitOut>> {
    let result = service::upload::commit(&state.pool, payload).await?;
    Ok(Json(result))
}
