//! Application layer: use-case services over the domain repositories.
//!
//! HTTP handlers stay thin and delegate here; every business rule
//! (validation, stock invariants, admin protection) lives in a service.

pub mod identity;
pub mod inventory;
pub mod sales;
pub mod workforce;

pub use identity::{AuthResult, IdentityService};
pub use inventory::InventoryService;
pub use sales::SalesService;
pub use workforce::WorkforceService;
