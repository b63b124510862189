use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessTokenIssuer;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::OtpCode;
use crate::domain::auth::models::RefreshToken;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::otp::OtpManager;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::NotificationGateway;
use crate::domain::auth::ports::OneTimeCodeRepository;
use crate::domain::auth::ports::RefreshSessionRepository;
use crate::domain::auth::session::RefreshSessionManager;
use crate::domain::subject::models::Contact;
use crate::domain::subject::models::Subject;
use crate::domain::subject::models::SubjectId;
use crate::domain::subject::ports::SubjectRepository;
use crate::subject::errors::SubjectError;

/// Orchestrates the login / verify / refresh / logout protocol.
///
/// Composes the OTP manager, the refresh session manager, and the access
/// token issuer over the credential store. Login and registration share one
/// entry point: an unrecognized contact is registered on the spot, and the
/// caller cannot tell which path ran.
pub struct AuthService<SR, OR, RR, NG>
where
    SR: SubjectRepository,
    OR: OneTimeCodeRepository,
    RR: RefreshSessionRepository,
    NG: NotificationGateway,
{
    subjects: Arc<SR>,
    otp: OtpManager<OR>,
    sessions: RefreshSessionManager<RR>,
    notifier: Arc<NG>,
    issuer: Arc<AccessTokenIssuer>,
}

impl<SR, OR, RR, NG> AuthService<SR, OR, RR, NG>
where
    SR: SubjectRepository,
    OR: OneTimeCodeRepository,
    RR: RefreshSessionRepository,
    NG: NotificationGateway,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `subjects` - Subject persistence implementation
    /// * `otp` - One-time code manager
    /// * `sessions` - Refresh session manager
    /// * `notifier` - Outbound code delivery
    /// * `issuer` - Access token issuer
    pub fn new(
        subjects: Arc<SR>,
        otp: OtpManager<OR>,
        sessions: RefreshSessionManager<RR>,
        notifier: Arc<NG>,
        issuer: Arc<AccessTokenIssuer>,
    ) -> Self {
        Self {
            subjects,
            otp,
            sessions,
            notifier,
            issuer,
        }
    }

    /// Auto-register a subject for an unrecognized contact.
    ///
    /// A concurrent first login with the same contact may win the insert;
    /// the unique violation then resolves to the existing record instead of
    /// surfacing.
    async fn register(&self, contact: &Contact) -> Result<Subject, AuthError> {
        let now = Utc::now();
        let subject = Subject {
            id: SubjectId::new(),
            display_name: Some(contact.to_string()),
            email_address: match contact {
                Contact::Email(email) => Some(email.clone()),
                Contact::Phone(_) => None,
            },
            phone_number: match contact {
                Contact::Email(_) => None,
                Contact::Phone(phone) => Some(phone.clone()),
            },
            image_path: None,
            created_at: now,
            updated_at: now,
        };

        match self.subjects.create(subject).await {
            Ok(subject) => {
                tracing::info!(subject_id = %subject.id, "Subject auto-registered on login");
                Ok(subject)
            }
            Err(SubjectError::EmailAlreadyExists(_)) | Err(SubjectError::PhoneAlreadyExists(_)) => {
                // lost a concurrent first-login race; the contact now exists
                self.subjects
                    .find_by_contact(contact)
                    .await?
                    .ok_or_else(|| {
                        AuthError::Unknown("contact vanished after unique violation".to_string())
                    })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Hand the code off for delivery without blocking the response path.
    fn dispatch_code(&self, destination: Contact, code: OtpCode) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.send_code(&destination, &code).await {
                tracing::error!(
                    destination = %destination,
                    error = %e,
                    "Failed to deliver one-time code"
                );
            }
        });
    }
}

#[async_trait]
impl<SR, OR, RR, NG> AuthServicePort for AuthService<SR, OR, RR, NG>
where
    SR: SubjectRepository,
    OR: OneTimeCodeRepository,
    RR: RefreshSessionRepository,
    NG: NotificationGateway,
{
    async fn login(&self, raw_contact: &str) -> Result<LoginOutcome, AuthError> {
        let contact = Contact::parse(raw_contact)?;

        let existing = self.subjects.find_by_contact(&contact).await?;
        let (subject, newly_registered) = match existing {
            Some(subject) => (subject, false),
            None => (self.register(&contact).await?, true),
        };

        let access_token = self.issuer.mint(&subject.id.to_string())?;
        let refresh_token = self.sessions.issue(&subject.id, contact.as_str()).await?;

        // every login re-challenges, replacing any earlier code
        let code = self.otp.issue(&subject.id).await?;
        if newly_registered {
            self.dispatch_code(contact, code);
        }

        tracing::info!(subject_id = %subject.id, "Subject logged in");

        Ok(LoginOutcome {
            access_token,
            refresh_token,
            subject,
        })
    }

    async fn verify_otp(&self, subject_id: &SubjectId, code: &str) -> Result<(), AuthError> {
        self.otp.verify(subject_id, code).await
    }

    async fn refresh(&self, raw_token: &str) -> Result<TokenPair, AuthError> {
        let token: RefreshToken = raw_token
            .parse()
            .map_err(|_| AuthError::InvalidOrExpiredToken)?;

        let session = self.sessions.verify(&token).await?;

        let subject = self
            .subjects
            .find_by_id(&session.subject_id)
            .await?
            .ok_or(AuthError::InvalidOrExpiredToken)?;

        let refresh_token = self.sessions.rotate(&session).await?;
        let access_token = self.issuer.mint(&subject.id.to_string())?;

        tracing::info!(subject_id = %subject.id, "Access token refreshed");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn logout(&self, raw_token: &str, subject_id: &SubjectId) -> Result<(), AuthError> {
        let subject = self
            .subjects
            .find_by_id(subject_id)
            .await?
            .ok_or_else(|| AuthError::SubjectNotFound(subject_id.to_string()))?;

        let token: RefreshToken = raw_token.parse().map_err(|_| AuthError::SessionNotFound)?;

        let session = self
            .sessions
            .find_for_subject(&token, &subject.id)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        self.sessions.revoke(&session).await?;

        tracing::info!(subject_id = %subject.id, "Subject logged out");

        Ok(())
    }
}
