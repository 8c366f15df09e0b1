use axum::{extract::State, Json};

use crate::{
    app::AppState,
    error::AppResult,
    model::{LookupOut, SpecialtyOut},
    service,
};

pub async fn list_specialties(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SpecialtyOut>>> {
    let specialties = service::specialties::list(&state.pool).await?;
    Ok(Json(specialties))
}

pub async fn list_faculties(State(state): State<AppState>) -> AppResult<Json<Vec<LookupOut>>> {
    let faculties = service::specialties::list_faculties(&state.pool).await?;
    Ok(Json(faculties))
}

pub async fn list_degrees(State(state): State<AppState>) -> AppResult<Json<Vec<LookupOut>>> {
    let degrees = service::specialties::list_degrees(&state.pool).await?;
    Ok(Json(degrees))
}
