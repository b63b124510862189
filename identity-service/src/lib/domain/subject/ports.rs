use async_trait::async_trait;

use crate::domain::subject::models::Contact;
use crate::domain::subject::models::CreateSubjectCommand;
use crate::domain::subject::models::Subject;
use crate::domain::subject::models::SubjectId;
use crate::domain::subject::models::UpdateSubjectCommand;
use crate::subject::errors::SubjectError;

/// Port for subject domain service operations.
#[async_trait]
pub trait SubjectServicePort: Send + Sync + 'static {
    /// Create a new subject.
    ///
    /// # Arguments
    /// * `command` - Validated command carrying at least one contact channel
    ///
    /// # Returns
    /// Created subject entity
    ///
    /// # Errors
    /// * `MissingContact` - Neither email nor phone supplied
    /// * `EmailAlreadyExists` / `PhoneAlreadyExists` - Contact is taken
    /// * `DatabaseError` - Database operation failed
    async fn create_subject(&self, command: CreateSubjectCommand) -> Result<Subject, SubjectError>;

    /// Retrieve subject by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Subject does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_subject(&self, id: &SubjectId) -> Result<Subject, SubjectError>;

    /// Retrieve all subjects.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_subjects(&self) -> Result<Vec<Subject>, SubjectError>;

    /// Update existing subject with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - Subject does not exist
    /// * `EmailAlreadyExists` / `PhoneAlreadyExists` - New contact is taken
    /// * `DatabaseError` - Database operation failed
    async fn update_subject(
        &self,
        id: &SubjectId,
        command: UpdateSubjectCommand,
    ) -> Result<Subject, SubjectError>;

    /// Delete existing subject.
    ///
    /// Deleting a subject cascades to its one-time code and refresh
    /// sessions at the storage layer.
    ///
    /// # Errors
    /// * `NotFound` - Subject does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_subject(&self, id: &SubjectId) -> Result<(), SubjectError>;
}

/// Persistence operations for the subject aggregate.
#[async_trait]
pub trait SubjectRepository: Send + Sync + 'static {
    /// Persist new subject to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PhoneAlreadyExists` - Phone number is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, subject: Subject) -> Result<Subject, SubjectError>;

    /// Retrieve subject by identifier.
    ///
    /// # Returns
    /// Optional subject entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &SubjectId) -> Result<Option<Subject>, SubjectError>;

    /// Retrieve subject owning the given contact channel.
    ///
    /// An email contact is matched against the email column, a phone
    /// contact against the phone column.
    ///
    /// # Returns
    /// Optional subject entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_contact(&self, contact: &Contact) -> Result<Option<Subject>, SubjectError>;

    /// Retrieve all subjects from storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Subject>, SubjectError>;

    /// Update existing subject in storage.
    ///
    /// # Errors
    /// * `NotFound` - Subject does not exist
    /// * `EmailAlreadyExists` / `PhoneAlreadyExists` - New contact is taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, subject: Subject) -> Result<Subject, SubjectError>;

    /// Remove subject from storage.
    ///
    /// # Errors
    /// * `NotFound` - Subject does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &SubjectId) -> Result<(), SubjectError>;
}
