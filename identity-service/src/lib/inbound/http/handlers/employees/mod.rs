use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::employee::models::Employee;

pub mod create_employee;
pub mod delete_employee;
pub mod get_employee;
pub mod list_employees;
pub mod update_employee;

pub use create_employee::create_employee;
pub use delete_employee::delete_employee;
pub use get_employee::get_employee;
pub use list_employees::list_employees;
pub use update_employee::update_employee;

/// Wire representation of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Employee> for EmployeeData {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.to_string(),
            name: employee.name.clone(),
            email: employee.email.as_str().to_string(),
            created_by: employee.created_by.to_string(),
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}
