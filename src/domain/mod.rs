//! Domain layer: entities, value types and repository traits.

pub mod employee;
pub mod error;
pub mod sale;
pub mod spare;
pub mod user;

pub use error::{DomainError, DomainResult};

pub use employee::{Employee, EmployeeRepositoryInterface, EmployeeUpdate, NewEmployee};
pub use sale::{Sale, SaleRepositoryInterface, SaleWithSpare};
pub use spare::{Spare, SpareFields, SpareRepositoryInterface};
pub use user::{CreateUserDto, User, UserRepositoryInterface, UserRole};
