use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::employee::errors::EmployeeIdError;
use crate::domain::subject::models::EmailAddress;
use crate::domain::subject::models::SubjectId;

/// Employee record, owned by the subject that created it.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: EmailAddress,
    pub created_by: SubjectId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employee unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmployeeId(pub Uuid);

impl EmployeeId {
    /// Generate a new time-ordered employee ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse an employee ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, EmployeeIdError> {
        Uuid::parse_str(s)
            .map(EmployeeId)
            .map_err(|e| EmployeeIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new employee with domain types
#[derive(Debug)]
pub struct CreateEmployeeCommand {
    pub name: String,
    pub email: EmailAddress,
    pub created_by: SubjectId,
}

impl CreateEmployeeCommand {
    /// Construct a new create employee command.
    ///
    /// # Arguments
    /// * `name` - Employee name
    /// * `email` - Validated email address
    /// * `created_by` - The authenticated subject creating the record
    pub fn new(name: String, email: EmailAddress, created_by: SubjectId) -> Self {
        Self {
            name,
            email,
            created_by,
        }
    }
}

/// Command to update an existing employee with optional validated fields.
///
/// Only provided fields will be updated.
#[derive(Debug)]
pub struct UpdateEmployeeCommand {
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
}
