//! Spare aggregate — an inventory item with a tracked quantity and price.

pub mod model;
pub mod repository;

pub use model::{Spare, SpareFields};
pub use repository::SpareRepositoryInterface;
