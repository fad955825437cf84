//! Sale domain entity

use chrono::{DateTime, Utc};

/// A recorded sale. Immutable once created: no update or delete operation
/// exists anywhere in the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub id: i32,
    pub spare_id: i32,
    pub quantity_sold: i32,
    pub sold_at: DateTime<Utc>,
}

/// A sale joined with its spare's name, for listings.
#[derive(Debug, Clone)]
pub struct SaleWithSpare {
    pub sale: Sale,
    pub spare_name: String,
}
