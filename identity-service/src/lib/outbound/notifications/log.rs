use async_trait::async_trait;

use crate::domain::auth::errors::NotificationError;
use crate::domain::auth::models::OtpCode;
use crate::domain::auth::ports::NotificationGateway;
use crate::domain::subject::models::Contact;

/// Notification gateway that records dispatches without delivering them.
///
/// Stands in for an email/SMS provider adapter behind the same port. The
/// code itself is never written to the log, only the destination channel.
pub struct LogNotificationGateway;

impl LogNotificationGateway {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogNotificationGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationGateway for LogNotificationGateway {
    async fn send_code(
        &self,
        destination: &Contact,
        _code: &OtpCode,
    ) -> Result<(), NotificationError> {
        match destination {
            Contact::Email(email) => {
                tracing::info!(channel = "email", destination = %email, "One-time code dispatched");
            }
            Contact::Phone(phone) => {
                tracing::info!(channel = "sms", destination = %phone, "One-time code dispatched");
            }
        }

        Ok(())
    }
}
