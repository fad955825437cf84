//! Sale aggregate — an immutable record of units removed from stock.

pub mod model;
pub mod repository;

pub use model::{Sale, SaleWithSpare};
pub use repository::SaleRepositoryInterface;
