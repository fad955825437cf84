//! Spare-part DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Spare, SpareFields};

/// Spare API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct SpareDto {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub quantity: i32,
    /// Serialized as a decimal string, e.g. "25.50"
    #[schema(value_type = String, example = "25.50")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Spare> for SpareDto {
    fn from(s: Spare) -> Self {
        Self {
            id: s.id,
            name: s.name,
            company: s.company,
            quantity: s.quantity,
            price: s.price,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Create/update request. An update is a full overwrite, so the same body
/// serves both.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SpareRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub company: Option<String>,
    #[validate(range(min = 0, message = "Quantity must be non-negative"))]
    pub quantity: i32,
    /// Unit price; must be non-negative. Accepts a number or a decimal
    /// string.
    #[schema(value_type = String, example = "25.50")]
    pub price: Decimal,
}

impl From<SpareRequest> for SpareFields {
    fn from(r: SpareRequest) -> Self {
        Self {
            name: r.name,
            company: r.company,
            quantity: r.quantity,
            price: r.price,
        }
    }
}
