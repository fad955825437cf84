//! Inventory API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{SpareDto, SpareRequest};
use crate::application::InventoryService;
use crate::infrastructure::database::repositories::{SaleRepository, SpareRepository};
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};

/// Spare handler state — concrete over the SeaORM repositories for Axum
/// compatibility.
#[derive(Clone)]
pub struct SpareHandlerState {
    pub inventory: Arc<InventoryService<SpareRepository, SaleRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/spares",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Spare list", body = ApiResponse<Vec<SpareDto>>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_spares(
    State(state): State<SpareHandlerState>,
) -> Result<Json<ApiResponse<Vec<SpareDto>>>, (StatusCode, Json<ApiResponse<Vec<SpareDto>>>)> {
    let spares = state
        .inventory
        .list_spares()
        .await
        .map_err(|e| domain_error(&e))?;

    let items: Vec<SpareDto> = spares.into_iter().map(SpareDto::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    get,
    path = "/api/v1/spares/{id}",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Spare ID")),
    responses(
        (status = 200, description = "Spare details", body = ApiResponse<SpareDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_spare(
    State(state): State<SpareHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SpareDto>>, (StatusCode, Json<ApiResponse<SpareDto>>)> {
    let spare = state
        .inventory
        .get_spare(id)
        .await
        .map_err(|e| domain_error(&e))?;

    match spare {
        Some(spare) => Ok(Json(ApiResponse::success(SpareDto::from(spare)))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Spare {} not found", id))),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/spares",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    request_body = SpareRequest,
    responses(
        (status = 201, description = "Spare created", body = ApiResponse<SpareDto>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn add_spare(
    State(state): State<SpareHandlerState>,
    ValidatedJson(request): ValidatedJson<SpareRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SpareDto>>), (StatusCode, Json<ApiResponse<SpareDto>>)> {
    let spare = state
        .inventory
        .add_spare(request.into())
        .await
        .map_err(|e| domain_error(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SpareDto::from(spare))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/spares/{id}",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Spare ID")),
    request_body = SpareRequest,
    responses(
        (status = 200, description = "Spare updated", body = ApiResponse<SpareDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_spare(
    State(state): State<SpareHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<SpareRequest>,
) -> Result<Json<ApiResponse<SpareDto>>, (StatusCode, Json<ApiResponse<SpareDto>>)> {
    let updated = state
        .inventory
        .update_spare(id, request.into())
        .await
        .map_err(|e| domain_error(&e))?;

    match updated {
        Some(spare) => Ok(Json(ApiResponse::success(SpareDto::from(spare)))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Spare {} not found", id))),
        )),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/spares/{id}",
    tag = "Inventory",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Spare ID")),
    responses(
        (status = 200, description = "Spare deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Spare has recorded sales")
    )
)]
pub async fn delete_spare(
    State(state): State<SpareHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .inventory
        .delete_spare(id)
        .await
        .map_err(|e| domain_error(&e))?;

    Ok(Json(ApiResponse::success(())))
}
