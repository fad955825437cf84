//! Workforce service — employee registry
//!
//! Every operation here is admin-only; the router enforces that before a
//! request ever reaches this service.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, Employee, EmployeeRepositoryInterface, EmployeeUpdate, NewEmployee,
};
use crate::infrastructure::uploads::DocumentStore;

/// Date format accepted for `joining_date`
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw registration input as it arrives from the request; the date is
/// still a string and the document still bytes.
#[derive(Debug)]
pub struct EmployeeRegistration {
    pub name: String,
    pub designation: String,
    pub contact: String,
    pub aadhaar: String,
    pub joining_date: String,
    /// `(original filename, content)` of the uploaded identity document
    pub document: Option<(String, Vec<u8>)>,
}

pub struct WorkforceService<E: EmployeeRepositoryInterface> {
    repo: Arc<E>,
    documents: DocumentStore,
}

impl<E: EmployeeRepositoryInterface> WorkforceService<E> {
    pub fn new(repo: Arc<E>, documents: DocumentStore) -> Self {
        Self { repo, documents }
    }

    pub async fn add_employee(&self, registration: EmployeeRegistration) -> DomainResult<Employee> {
        let joining_date = parse_joining_date(&registration.joining_date)?;
        validate_text_fields(
            &registration.name,
            &registration.designation,
            &registration.contact,
            &registration.aadhaar,
        )?;

        // The document write is outside the database transaction; if the
        // insert fails we remove the blob again on a best-effort basis.
        let document_file = match registration.document {
            Some((original_name, data)) => {
                Some(self.documents.store(&original_name, &data).await?)
            }
            None => None,
        };

        let result = self
            .repo
            .create_employee(NewEmployee {
                name: registration.name.trim().to_string(),
                designation: registration.designation.trim().to_string(),
                contact: registration.contact.trim().to_string(),
                aadhaar: registration.aadhaar.trim().to_string(),
                joining_date,
                document_file: document_file.clone(),
            })
            .await;

        match result {
            Ok(employee) => {
                info!(
                    employee_id = employee.id,
                    name = %employee.name,
                    has_document = employee.document_file.is_some(),
                    "Employee added"
                );
                Ok(employee)
            }
            Err(e) => {
                if let Some(stored) = document_file {
                    self.documents.remove(&stored).await;
                }
                Err(e)
            }
        }
    }

    pub async fn list_employees(&self) -> DomainResult<Vec<Employee>> {
        self.repo.list_employees().await
    }

    pub async fn get_employee(&self, id: i32) -> DomainResult<Option<Employee>> {
        self.repo.get_employee(id).await
    }

    pub async fn update_employee(
        &self,
        id: i32,
        update: EmployeeUpdate,
    ) -> DomainResult<Option<Employee>> {
        validate_text_fields(
            &update.name,
            &update.designation,
            &update.contact,
            &update.aadhaar,
        )?;

        let updated = self
            .repo
            .update_employee(
                id,
                EmployeeUpdate {
                    name: update.name.trim().to_string(),
                    designation: update.designation.trim().to_string(),
                    contact: update.contact.trim().to_string(),
                    aadhaar: update.aadhaar.trim().to_string(),
                },
            )
            .await?;

        if updated.is_some() {
            info!(employee_id = id, "Employee updated");
        }
        Ok(updated)
    }

    pub async fn delete_employee(&self, id: i32) -> DomainResult<()> {
        let deleted = self.repo.delete_employee(id).await?;

        if let Some(stored) = deleted.document_file {
            self.documents.remove(&stored).await;
        }

        info!(employee_id = id, name = %deleted.name, "Employee deleted");
        Ok(())
    }

    /// Fetch the stored identity document for an employee.
    pub async fn get_document(&self, employee_id: i32) -> DomainResult<(String, Vec<u8>)> {
        let employee = self
            .repo
            .get_employee(employee_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Employee",
                field: "id",
                value: employee_id.to_string(),
            })?;

        let stored = employee.document_file.ok_or(DomainError::NotFound {
            entity: "Document",
            field: "employee_id",
            value: employee_id.to_string(),
        })?;

        let data = self.documents.load(&stored).await?;
        Ok((stored, data))
    }
}

fn parse_joining_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        DomainError::Validation(format!(
            "Invalid joining date '{}', expected YYYY-MM-DD",
            raw
        ))
    })
}

fn validate_text_fields(
    name: &str,
    designation: &str,
    contact: &str,
    aadhaar: &str,
) -> DomainResult<()> {
    for (label, value) in [
        ("Name", name),
        ("Designation", designation),
        ("Contact", contact),
        ("Aadhaar", aadhaar),
    ] {
        if value.trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "{} must not be empty",
                label
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::setup_db;
    use crate::infrastructure::database::repositories::EmployeeRepository;

    async fn service() -> (tempfile::TempDir, WorkforceService<EmployeeRepository>) {
        let dir = tempfile::tempdir().unwrap();
        let documents = DocumentStore::new(dir.path(), 1024 * 1024);
        documents.init().await.unwrap();

        let db = setup_db().await;
        let svc = WorkforceService::new(Arc::new(EmployeeRepository::new(db)), documents);
        (dir, svc)
    }

    fn registration(joining_date: &str) -> EmployeeRegistration {
        EmployeeRegistration {
            name: "Ravi".to_string(),
            designation: "Mechanic".to_string(),
            contact: "9876543210".to_string(),
            aadhaar: "1234-5678-9012".to_string(),
            joining_date: joining_date.to_string(),
            document: None,
        }
    }

    #[tokio::test]
    async fn malformed_joining_date_is_a_validation_error() {
        let (_dir, svc) = service().await;

        for bad in ["15-03-2024", "2024/03/15", "yesterday", ""] {
            let err = svc.add_employee(registration(bad)).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "input: {bad}");
        }

        assert!(svc.list_employees().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn document_is_stored_and_referenced() {
        let (_dir, svc) = service().await;

        let mut reg = registration("2024-03-15");
        reg.document = Some(("id scan.pdf".to_string(), b"%PDF-1.4".to_vec()));

        let employee = svc.add_employee(reg).await.unwrap();
        let stored = employee.document_file.clone().unwrap();
        assert!(stored.ends_with("_id_scan.pdf"));

        let (name, data) = svc.get_document(employee.id).await.unwrap();
        assert_eq!(name, stored);
        assert_eq!(data, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn document_of_employee_without_upload_is_not_found() {
        let (_dir, svc) = service().await;
        let employee = svc.add_employee(registration("2024-03-15")).await.unwrap();

        let err = svc.get_document(employee.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_removes_record_and_document() {
        let (dir, svc) = service().await;

        let mut reg = registration("2024-03-15");
        reg.document = Some(("scan.pdf".to_string(), b"data".to_vec()));
        let employee = svc.add_employee(reg).await.unwrap();
        let stored = employee.document_file.clone().unwrap();

        svc.delete_employee(employee.id).await.unwrap();

        assert!(svc.get_employee(employee.id).await.unwrap().is_none());
        assert!(!dir.path().join(stored).exists());
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let (_dir, svc) = service().await;

        let mut reg = registration("2024-03-15");
        reg.designation = "  ".to_string();
        let err = svc.add_employee(reg).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
