use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    app::AppState,
    error::AppResult,
    model::{PlanEntryOut, PlanQuery},
    service,
};

pub async fn list_plan(
    State(state): State<AppState>,
    Query(query): Query<PlanQuery>,
) -> AppResult<Json<Vec<PlanEntryOut>>> {
    let entries = service::plans::list(&state.pool, query).await?;
    Ok(Json(entries))
}
