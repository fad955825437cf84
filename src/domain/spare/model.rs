//! Spare domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A spare part held in stock.
#[derive(Debug, Clone, PartialEq)]
pub struct Spare {
    pub id: i32,
    pub name: String,
    pub company: Option<String>,
    /// Units on hand. Never negative; mutated only by a sale or a direct
    /// inventory edit.
    pub quantity: i32,
    /// Unit price.
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The writable fields of a spare. Creation and update both take the full
/// set — an update is a complete overwrite.
#[derive(Debug, Clone)]
pub struct SpareFields {
    pub name: String,
    pub company: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}
