//! Employee aggregate

pub mod model;
pub mod repository;

pub use model::{Employee, EmployeeUpdate, NewEmployee};
pub use repository::EmployeeRepositoryInterface;
