//! Employee DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Employee, EmployeeUpdate};

/// Employee API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeDto {
    pub id: i32,
    pub name: String,
    pub designation: String,
    pub contact: String,
    pub aadhaar: String,
    /// Stored document reference; fetch via the document endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_file: Option<String>,
    pub joining_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: e.name,
            designation: e.designation,
            contact: e.contact,
            aadhaar: e.aadhaar,
            document_file: e.document_file,
            joining_date: e.joining_date,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Update request — editable text fields only; the joining date and the
/// document reference are fixed at registration.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Designation must be 1-100 characters"))]
    pub designation: String,
    #[validate(length(min = 1, max = 20, message = "Contact must be 1-20 characters"))]
    pub contact: String,
    #[validate(length(min = 1, max = 20, message = "Aadhaar must be 1-20 characters"))]
    pub aadhaar: String,
}

impl From<UpdateEmployeeRequest> for EmployeeUpdate {
    fn from(r: UpdateEmployeeRequest) -> Self {
        Self {
            name: r.name,
            designation: r.designation,
            contact: r.contact,
            aadhaar: r.aadhaar,
        }
    }
}
