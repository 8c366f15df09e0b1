use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    app::AppState,
    error::AppResult,
    model::{AcademQuery, AcademReportOut},
    service,
};

pub async fn academ_difference(
    State(state): State<AppState>,
    Query(query): Query<AcademQuery>,
) -> AppResult<Json<AcademReportOut>> {
    let report = service::academ::compare(&state.pool, &state.engine, query).await?;
    Ok(Json(report))
}
