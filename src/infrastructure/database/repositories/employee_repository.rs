use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set};

use super::db_err;
use crate::domain::{
    DomainError, DomainResult, Employee, EmployeeRepositoryInterface, EmployeeUpdate, NewEmployee,
};
use crate::infrastructure::database::entities::employee;

pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn employee_model_to_domain(model: employee::Model) -> Employee {
    Employee {
        id: model.id,
        name: model.name,
        designation: model.designation,
        contact: model.contact,
        aadhaar: model.aadhaar,
        document_file: model.document_file,
        joining_date: model.joining_date,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl EmployeeRepositoryInterface for EmployeeRepository {
    async fn create_employee(&self, input: NewEmployee) -> DomainResult<Employee> {
        let now = Utc::now();

        let new_employee = employee::ActiveModel {
            name: Set(input.name),
            designation: Set(input.designation),
            contact: Set(input.contact),
            aadhaar: Set(input.aadhaar),
            document_file: Set(input.document_file),
            joining_date: Set(input.joining_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = new_employee.insert(&self.db).await.map_err(db_err)?;
        Ok(employee_model_to_domain(model))
    }

    async fn list_employees(&self) -> DomainResult<Vec<Employee>> {
        let models = employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(employee_model_to_domain).collect())
    }

    async fn get_employee(&self, id: i32) -> DomainResult<Option<Employee>> {
        let model = employee::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(employee_model_to_domain))
    }

    async fn update_employee(
        &self,
        id: i32,
        update: EmployeeUpdate,
    ) -> DomainResult<Option<Employee>> {
        let existing = employee::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: employee::ActiveModel = existing.into();
        active.name = Set(update.name);
        active.designation = Set(update.designation);
        active.contact = Set(update.contact);
        active.aadhaar = Set(update.aadhaar);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(employee_model_to_domain(updated)))
    }

    async fn delete_employee(&self, id: i32) -> DomainResult<Employee> {
        let existing = employee::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Employee",
                field: "id",
                value: id.to_string(),
            });
        };

        let domain = employee_model_to_domain(existing.clone());
        existing.delete(&self.db).await.map_err(db_err)?;

        Ok(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::setup_db;
    use chrono::NaiveDate;

    fn new_employee(name: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            designation: "Mechanic".to_string(),
            contact: "9876543210".to_string(),
            aadhaar: "1234-5678-9012".to_string(),
            joining_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            document_file: None,
        }
    }

    #[tokio::test]
    async fn create_and_fetch() {
        let repo = EmployeeRepository::new(setup_db().await);

        let created = repo.create_employee(new_employee("Ravi")).await.unwrap();
        let fetched = repo.get_employee(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Ravi");
        assert_eq!(fetched.designation, "Mechanic");
        assert_eq!(
            fetched.joining_date,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(fetched.document_file, None);
    }

    #[tokio::test]
    async fn update_keeps_joining_date_and_document() {
        let repo = EmployeeRepository::new(setup_db().await);

        let mut input = new_employee("Ravi");
        input.document_file = Some("abc_scan.pdf".to_string());
        let created = repo.create_employee(input).await.unwrap();

        let updated = repo
            .update_employee(
                created.id,
                EmployeeUpdate {
                    name: "Ravi K".to_string(),
                    designation: "Senior Mechanic".to_string(),
                    contact: "9876500000".to_string(),
                    aadhaar: "1234-5678-9012".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Ravi K");
        assert_eq!(updated.designation, "Senior Mechanic");
        assert_eq!(updated.joining_date, created.joining_date);
        assert_eq!(updated.document_file.as_deref(), Some("abc_scan.pdf"));
    }

    #[tokio::test]
    async fn delete_returns_record() {
        let repo = EmployeeRepository::new(setup_db().await);
        let created = repo.create_employee(new_employee("Ravi")).await.unwrap();

        let deleted = repo.delete_employee(created.id).await.unwrap();
        assert_eq!(deleted.id, created.id);
        assert!(repo.get_employee(created.id).await.unwrap().is_none());

        let err = repo.delete_employee(created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
