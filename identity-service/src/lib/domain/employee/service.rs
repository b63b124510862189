use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::employee::errors::EmployeeError;
use crate::domain::employee::models::CreateEmployeeCommand;
use crate::domain::employee::models::Employee;
use crate::domain::employee::models::EmployeeId;
use crate::domain::employee::models::UpdateEmployeeCommand;
use crate::domain::employee::ports::EmployeeRepository;
use crate::domain::employee::ports::EmployeeServicePort;

/// Domain service implementation for employee operations.
pub struct EmployeeService<ER>
where
    ER: EmployeeRepository,
{
    repository: Arc<ER>,
}

impl<ER> EmployeeService<ER>
where
    ER: EmployeeRepository,
{
    /// Create a new employee service with an injected repository.
    pub fn new(repository: Arc<ER>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<ER> EmployeeServicePort for EmployeeService<ER>
where
    ER: EmployeeRepository,
{
    async fn create_employee(
        &self,
        command: CreateEmployeeCommand,
    ) -> Result<Employee, EmployeeError> {
        let now = Utc::now();
        let employee = Employee {
            id: EmployeeId::new(),
            name: command.name,
            email: command.email,
            created_by: command.created_by,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(employee).await?;
        tracing::info!(
            employee_id = %created.id,
            created_by = %created.created_by,
            "Employee created"
        );

        Ok(created)
    }

    async fn get_employee(&self, id: &EmployeeId) -> Result<Employee, EmployeeError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(EmployeeError::NotFound(id.to_string()))
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, EmployeeError> {
        self.repository.list_all().await
    }

    async fn update_employee(
        &self,
        id: &EmployeeId,
        command: UpdateEmployeeCommand,
    ) -> Result<Employee, EmployeeError> {
        let mut employee = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(EmployeeError::NotFound(id.to_string()))?;

        if let Some(name) = command.name {
            employee.name = name;
        }

        if let Some(email) = command.email {
            employee.email = email;
        }

        employee.updated_at = Utc::now();

        self.repository.update(employee).await
    }

    async fn delete_employee(&self, id: &EmployeeId) -> Result<(), EmployeeError> {
        self.repository.delete(id).await?;
        tracing::info!(employee_id = %id, "Employee deleted");
        Ok(())
    }
}
