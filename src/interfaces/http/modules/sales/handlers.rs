//! Sales API handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{RecordSaleRequest, SaleDto};
use crate::application::SalesService;
use crate::infrastructure::database::repositories::SaleRepository;
use crate::interfaces::http::common::{
    domain_error, ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};

/// Sales handler state
#[derive(Clone)]
pub struct SaleHandlerState {
    pub sales: Arc<SalesService<SaleRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/sales",
    tag = "Sales",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Sales history, most recent first", body = PaginatedResponse<SaleDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_sales(
    State(state): State<SaleHandlerState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<SaleDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let result = state
        .sales
        .list_sales(params.page, params.limit)
        .await
        .map_err(|e| domain_error(&e))?;

    Ok(Json(PaginatedResponse::from(result)))
}

#[utoipa::path(
    post,
    path = "/api/v1/sales",
    tag = "Sales",
    security(("bearer_auth" = [])),
    request_body = RecordSaleRequest,
    responses(
        (status = 201, description = "Sale recorded and stock updated", body = ApiResponse<SaleDto>),
        (status = 404, description = "Spare not found"),
        (status = 409, description = "Not enough stock to complete sale")
    )
)]
pub async fn record_sale(
    State(state): State<SaleHandlerState>,
    ValidatedJson(request): ValidatedJson<RecordSaleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SaleDto>>), (StatusCode, Json<ApiResponse<SaleDto>>)> {
    let sale = state
        .sales
        .record_sale(request.spare_id, request.quantity_sold)
        .await
        .map_err(|e| domain_error(&e))?;

    let dto = SaleDto {
        id: sale.id,
        spare_id: sale.spare_id,
        spare_name: None,
        quantity_sold: sale.quantity_sold,
        sold_at: sale.sold_at,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
}
