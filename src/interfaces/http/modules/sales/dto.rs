//! Sales DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::SaleWithSpare;

/// Sale API representation
#[derive(Debug, Serialize, ToSchema)]
pub struct SaleDto {
    pub id: i32,
    pub spare_id: i32,
    /// Present in listings; omitted in the record-sale response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spare_name: Option<String>,
    pub quantity_sold: i32,
    pub sold_at: DateTime<Utc>,
}

impl From<SaleWithSpare> for SaleDto {
    fn from(s: SaleWithSpare) -> Self {
        Self {
            id: s.sale.id,
            spare_id: s.sale.spare_id,
            spare_name: Some(s.spare_name),
            quantity_sold: s.sale.quantity_sold,
            sold_at: s.sale.sold_at,
        }
    }
}

/// Record-sale request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordSaleRequest {
    pub spare_id: i32,
    #[validate(range(min = 1, message = "Quantity sold must be positive"))]
    pub quantity_sold: i32,
}
