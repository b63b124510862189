use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::subject::models::CreateSubjectCommand;
use crate::domain::subject::models::Subject;
use crate::domain::subject::models::SubjectId;
use crate::domain::subject::models::UpdateSubjectCommand;
use crate::subject::errors::SubjectError;
use crate::subject::ports::SubjectRepository;
use crate::subject::ports::SubjectServicePort;

/// Domain service implementation for subject operations.
///
/// Concrete implementation of SubjectServicePort with dependency injection.
pub struct SubjectService<SR>
where
    SR: SubjectRepository,
{
    repository: Arc<SR>,
}

impl<SR> SubjectService<SR>
where
    SR: SubjectRepository,
{
    /// Create a new subject service with an injected repository.
    pub fn new(repository: Arc<SR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<SR> SubjectServicePort for SubjectService<SR>
where
    SR: SubjectRepository,
{
    async fn create_subject(&self, command: CreateSubjectCommand) -> Result<Subject, SubjectError> {
        if command.email_address.is_none() && command.phone_number.is_none() {
            return Err(SubjectError::MissingContact);
        }

        let now = Utc::now();
        let subject = Subject {
            id: SubjectId::new(),
            display_name: command.display_name,
            email_address: command.email_address,
            phone_number: command.phone_number,
            image_path: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(subject).await?;
        tracing::info!(subject_id = %created.id, "Subject created");

        Ok(created)
    }

    async fn get_subject(&self, id: &SubjectId) -> Result<Subject, SubjectError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(SubjectError::NotFound(id.to_string()))
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, SubjectError> {
        self.repository.list_all().await
    }

    async fn update_subject(
        &self,
        id: &SubjectId,
        command: UpdateSubjectCommand,
    ) -> Result<Subject, SubjectError> {
        let mut subject = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(SubjectError::NotFound(id.to_string()))?;

        if let Some(display_name) = command.display_name {
            subject.display_name = Some(display_name);
        }

        if let Some(email_address) = command.email_address {
            subject.email_address = Some(email_address);
        }

        if let Some(phone_number) = command.phone_number {
            subject.phone_number = Some(phone_number);
        }

        if let Some(image_path) = command.image_path {
            subject.image_path = Some(image_path);
        }

        subject.updated_at = Utc::now();

        self.repository.update(subject).await
    }

    async fn delete_subject(&self, id: &SubjectId) -> Result<(), SubjectError> {
        self.repository.delete(id).await?;
        tracing::info!(subject_id = %id, "Subject deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::subject::models::Contact;
    use crate::domain::subject::models::EmailAddress;
    use crate::domain::subject::models::PhoneNumber;

    mock! {
        pub TestSubjectRepository {}

        #[async_trait]
        impl SubjectRepository for TestSubjectRepository {
            async fn create(&self, subject: Subject) -> Result<Subject, SubjectError>;
            async fn find_by_id(&self, id: &SubjectId) -> Result<Option<Subject>, SubjectError>;
            async fn find_by_contact(&self, contact: &Contact) -> Result<Option<Subject>, SubjectError>;
            async fn list_all(&self) -> Result<Vec<Subject>, SubjectError>;
            async fn update(&self, subject: Subject) -> Result<Subject, SubjectError>;
            async fn delete(&self, id: &SubjectId) -> Result<(), SubjectError>;
        }
    }

    fn sample_subject() -> Subject {
        let now = Utc::now();
        Subject {
            id: SubjectId::new(),
            display_name: Some("Ama".to_string()),
            email_address: Some(EmailAddress::new("ama@example.com".to_string()).unwrap()),
            phone_number: None,
            image_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_subject_success() {
        let mut repository = MockTestSubjectRepository::new();

        repository
            .expect_create()
            .withf(|subject| {
                subject.email_address.as_ref().map(|e| e.as_str()) == Some("ama@example.com")
                    && subject.display_name.as_deref() == Some("Ama")
            })
            .times(1)
            .returning(Ok);

        let service = SubjectService::new(Arc::new(repository));

        let command = CreateSubjectCommand::new(
            Some("Ama".to_string()),
            Some(EmailAddress::new("ama@example.com".to_string()).unwrap()),
            None,
        );

        let subject = service.create_subject(command).await.unwrap();
        assert_eq!(
            subject.email_address.as_ref().map(|e| e.as_str()),
            Some("ama@example.com")
        );
    }

    #[tokio::test]
    async fn test_create_subject_requires_a_contact() {
        let mut repository = MockTestSubjectRepository::new();
        repository.expect_create().times(0);

        let service = SubjectService::new(Arc::new(repository));

        let command = CreateSubjectCommand::new(Some("Ama".to_string()), None, None);

        let result = service.create_subject(command).await;
        assert!(matches!(result, Err(SubjectError::MissingContact)));
    }

    #[tokio::test]
    async fn test_create_subject_phone_only() {
        let mut repository = MockTestSubjectRepository::new();

        repository
            .expect_create()
            .withf(|subject| {
                subject.email_address.is_none()
                    && subject.phone_number.as_ref().map(|p| p.as_str()) == Some("0241234567")
            })
            .times(1)
            .returning(Ok);

        let service = SubjectService::new(Arc::new(repository));

        let command = CreateSubjectCommand::new(
            None,
            None,
            Some(PhoneNumber::new("0241234567".to_string()).unwrap()),
        );

        assert!(service.create_subject(command).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_subject_duplicate_email() {
        let mut repository = MockTestSubjectRepository::new();

        repository.expect_create().times(1).returning(|subject| {
            Err(SubjectError::EmailAlreadyExists(
                subject
                    .email_address
                    .map(|e| e.as_str().to_string())
                    .unwrap_or_default(),
            ))
        });

        let service = SubjectService::new(Arc::new(repository));

        let command = CreateSubjectCommand::new(
            None,
            Some(EmailAddress::new("ama@example.com".to_string()).unwrap()),
            None,
        );

        let result = service.create_subject(command).await;
        assert!(matches!(result, Err(SubjectError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_subject_success() {
        let mut repository = MockTestSubjectRepository::new();

        let expected = sample_subject();
        let subject_id = expected.id;

        let returned = expected.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == subject_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = SubjectService::new(Arc::new(repository));

        let subject = service.get_subject(&subject_id).await.unwrap();
        assert_eq!(subject.id, subject_id);
    }

    #[tokio::test]
    async fn test_get_subject_not_found() {
        let mut repository = MockTestSubjectRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = SubjectService::new(Arc::new(repository));

        let result = service.get_subject(&SubjectId::new()).await;
        assert!(matches!(result, Err(SubjectError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_subject_partial() {
        let mut repository = MockTestSubjectRepository::new();

        let existing = sample_subject();
        let subject_id = existing.id;

        let returned = existing.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == subject_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        repository
            .expect_update()
            .withf(|subject| {
                // untouched fields keep their values
                subject.display_name.as_deref() == Some("Akosua")
                    && subject.email_address.as_ref().map(|e| e.as_str())
                        == Some("ama@example.com")
            })
            .times(1)
            .returning(Ok);

        let service = SubjectService::new(Arc::new(repository));

        let command = UpdateSubjectCommand {
            display_name: Some("Akosua".to_string()),
            email_address: None,
            phone_number: None,
            image_path: None,
        };

        let updated = service.update_subject(&subject_id, command).await.unwrap();
        assert_eq!(updated.display_name.as_deref(), Some("Akosua"));
    }

    #[tokio::test]
    async fn test_update_subject_not_found() {
        let mut repository = MockTestSubjectRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = SubjectService::new(Arc::new(repository));

        let command = UpdateSubjectCommand {
            display_name: Some("Akosua".to_string()),
            email_address: None,
            phone_number: None,
            image_path: None,
        };

        let result = service.update_subject(&SubjectId::new(), command).await;
        assert!(matches!(result, Err(SubjectError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_subject() {
        let mut repository = MockTestSubjectRepository::new();

        let subject_id = SubjectId::new();
        repository
            .expect_delete()
            .withf(move |id| *id == subject_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = SubjectService::new(Arc::new(repository));

        assert!(service.delete_subject(&subject_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_subject_not_found() {
        let mut repository = MockTestSubjectRepository::new();

        repository
            .expect_delete()
            .times(1)
            .returning(|id| Err(SubjectError::NotFound(id.to_string())));

        let service = SubjectService::new(Arc::new(repository));

        let result = service.delete_subject(&SubjectId::new()).await;
        assert!(matches!(result, Err(SubjectError::NotFound(_))));
    }
}
