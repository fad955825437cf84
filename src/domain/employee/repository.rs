use async_trait::async_trait;

use super::{Employee, EmployeeUpdate, NewEmployee};
use crate::domain::DomainResult;

#[async_trait]
pub trait EmployeeRepositoryInterface: Send + Sync {
    async fn create_employee(&self, input: NewEmployee) -> DomainResult<Employee>;

    async fn list_employees(&self) -> DomainResult<Vec<Employee>>;
    async fn get_employee(&self, id: i32) -> DomainResult<Option<Employee>>;

    async fn update_employee(
        &self,
        id: i32,
        update: EmployeeUpdate,
    ) -> DomainResult<Option<Employee>>;

    /// Delete the record and return it (for document cleanup by the caller).
    async fn delete_employee(&self, id: i32) -> DomainResult<Employee>;
}
