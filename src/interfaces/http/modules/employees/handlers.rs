//! Employee API handlers
//!
//! Every route in this module is nested under the admin gate; the
//! handlers themselves never look at the caller's role.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::dto::{EmployeeDto, UpdateEmployeeRequest};
use crate::application::workforce::EmployeeRegistration;
use crate::application::WorkforceService;
use crate::domain::DomainError;
use crate::infrastructure::database::repositories::EmployeeRepository;
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};

/// Employee handler state
#[derive(Clone)]
pub struct EmployeeHandlerState {
    pub workforce: Arc<WorkforceService<EmployeeRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Employee list", body = ApiResponse<Vec<EmployeeDto>>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_employees(
    State(state): State<EmployeeHandlerState>,
) -> Result<Json<ApiResponse<Vec<EmployeeDto>>>, (StatusCode, Json<ApiResponse<Vec<EmployeeDto>>>)>
{
    let employees = state
        .workforce
        .list_employees()
        .await
        .map_err(|e| domain_error(&e))?;

    let items: Vec<EmployeeDto> = employees.into_iter().map(EmployeeDto::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee details", body = ApiResponse<EmployeeDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_employee(
    State(state): State<EmployeeHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EmployeeDto>>, (StatusCode, Json<ApiResponse<EmployeeDto>>)> {
    let employee = state
        .workforce
        .get_employee(id)
        .await
        .map_err(|e| domain_error(&e))?;

    match employee {
        Some(employee) => Ok(Json(ApiResponse::success(EmployeeDto::from(employee)))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Employee {} not found", id))),
        )),
    }
}

/// Register an employee.
///
/// Accepts `multipart/form-data` with text fields `name`, `designation`,
/// `contact`, `aadhaar`, `joining_date` (YYYY-MM-DD) and an optional file
/// field `document` holding the identity document.
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Employee created", body = ApiResponse<EmployeeDto>),
        (status = 400, description = "Missing field or malformed joining date")
    )
)]
pub async fn add_employee(
    State(state): State<EmployeeHandlerState>,
    multipart: Multipart,
) -> Result<
    (StatusCode, Json<ApiResponse<EmployeeDto>>),
    (StatusCode, Json<ApiResponse<EmployeeDto>>),
> {
    let registration = parse_registration(multipart)
        .await
        .map_err(|e| domain_error(&e))?;

    let employee = state
        .workforce
        .add_employee(registration)
        .await
        .map_err(|e| domain_error(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(EmployeeDto::from(employee))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = ApiResponse<EmployeeDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_employee(
    State(state): State<EmployeeHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateEmployeeRequest>,
) -> Result<Json<ApiResponse<EmployeeDto>>, (StatusCode, Json<ApiResponse<EmployeeDto>>)> {
    let updated = state
        .workforce
        .update_employee(id, request.into())
        .await
        .map_err(|e| domain_error(&e))?;

    match updated {
        Some(employee) => Ok(Json(ApiResponse::success(EmployeeDto::from(employee)))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Employee {} not found", id))),
        )),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_employee(
    State(state): State<EmployeeHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .workforce
        .delete_employee(id)
        .await
        .map_err(|e| domain_error(&e))?;

    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}/document",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Stored identity document"),
        (status = 404, description = "Employee or document not found")
    )
)]
pub async fn get_employee_document(
    State(state): State<EmployeeHandlerState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<()>>)> {
    let (filename, data) = state
        .workforce
        .get_document(id)
        .await
        .map_err(|e| domain_error(&e))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        data,
    ))
}

/// Pull the registration fields out of the multipart body.
async fn parse_registration(mut multipart: Multipart) -> Result<EmployeeRegistration, DomainError> {
    let mut name = None;
    let mut designation = None;
    let mut contact = None;
    let mut aadhaar = None;
    let mut joining_date = None;
    let mut document = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::Validation(format!("Invalid multipart request: {}", e)))?
    {
        let Some(field_name) = field.name().map(String::from) else {
            continue;
        };

        match field_name.as_str() {
            "document" => {
                let original_name = field.file_name().map(String::from);
                let data = field.bytes().await.map_err(|e| {
                    DomainError::Validation(format!("Failed to read upload: {}", e))
                })?;

                // an empty file input submits an empty part; treat as absent
                if let Some(original_name) = original_name {
                    if !original_name.is_empty() && !data.is_empty() {
                        document = Some((original_name, data.to_vec()));
                    }
                }
            }
            other => {
                let value = field.text().await.map_err(|e| {
                    DomainError::Validation(format!("Failed to read field '{}': {}", other, e))
                })?;

                match other {
                    "name" => name = Some(value),
                    "designation" => designation = Some(value),
                    "contact" => contact = Some(value),
                    "aadhaar" => aadhaar = Some(value),
                    "joining_date" => joining_date = Some(value),
                    _ => {}
                }
            }
        }
    }

    let require = |value: Option<String>, label: &str| {
        value.ok_or_else(|| DomainError::Validation(format!("Missing field '{}'", label)))
    };

    Ok(EmployeeRegistration {
        name: require(name, "name")?,
        designation: require(designation, "designation")?,
        contact: require(contact, "contact")?,
        aadhaar: require(aadhaar, "aadhaar")?,
        joining_date: require(joining_date, "joining_date")?,
        document,
    })
}
