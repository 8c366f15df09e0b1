use axum::{extract::State, Json};

use crate::{
    app::AppState,
    error::AppResult,
    model::{SimilarSubjectsOut, SimilarSubjectsPayload, SubjectOut},
    service,
};

pub async fn list_subjects(State(state): State<AppState>) -> AppResult<Json<Vec<SubjectOut>>> {
    let subjects = service::subjects::list(&state.pool).await?;
    Ok(Json(subjects))
}

pub async fn similar_subjects(
    State(state): State<AppState>,
    Json(payload): Json<SimilarSubjectsPayload>,
) -> AppResult<Json<Vec<SimilarSubjectsOut>>> {
    let ranked = service::subjects::similar(&state.pool, &state.matcher, payload.names).await?;
    Ok(Json(ranked))
}
