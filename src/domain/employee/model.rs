//! Employee domain entity

use chrono::{DateTime, NaiveDate, Utc};

/// A staff member on record. Management is restricted to administrators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub designation: String,
    pub contact: String,
    /// National identity number, kept as an opaque string.
    pub aadhaar: String,
    /// Stored filename of the uploaded identity document, if any. The
    /// registry never holds the binary content itself.
    pub document_file: Option<String>,
    pub joining_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering an employee.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub designation: String,
    pub contact: String,
    pub aadhaar: String,
    pub joining_date: NaiveDate,
    pub document_file: Option<String>,
}

/// Editable employee fields. Joining date and document reference are set at
/// registration and not overwritten here.
#[derive(Debug, Clone)]
pub struct EmployeeUpdate {
    pub name: String,
    pub designation: String,
    pub contact: String,
    pub aadhaar: String,
}
