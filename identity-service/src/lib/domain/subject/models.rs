use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::DateTime;
use chrono::Utc;
use regex::Regex;
use uuid::Uuid;

use crate::subject::errors::ContactError;
use crate::subject::errors::EmailError;
use crate::subject::errors::PhoneError;
use crate::subject::errors::SubjectIdError;

/// Subject aggregate entity.
///
/// An account identity, reachable through at least one contact channel.
/// Subjects are created either explicitly or by auto-registration on the
/// first login with an unrecognized contact.
#[derive(Debug, Clone)]
pub struct Subject {
    pub id: SubjectId,
    pub display_name: Option<String>,
    pub email_address: Option<EmailAddress>,
    pub phone_number: Option<PhoneNumber>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Subject unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubjectId(pub Uuid);

impl SubjectId {
    /// Generate a new subject ID.
    ///
    /// Uses UUID v7, so identifiers are time-ordered and sort
    /// lexicographically by creation time.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a subject ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed SubjectId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, SubjectIdError> {
        Uuid::parse_str(s)
            .map(SubjectId)
            .map_err(|e| SubjectIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates format using an RFC 5322 compliant parser and enforces the
/// RFC 5321 length limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 254;

    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string (surrounding whitespace is trimmed)
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `TooLong` - Email longer than 254 characters
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_string();
        if email.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: email.len(),
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

static PHONE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn phone_pattern() -> &'static Regex {
    // Local numbers: +233-prefixed or 0-prefixed
    PHONE_PATTERN.get_or_init(|| {
        Regex::new(r"^(?:\+233|0)(?:[2357]\d{8}|[23][2-9]\d{7})$").expect("valid phone pattern")
    })
}

/// Phone number type
///
/// Validates against the fixed regional dialing pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new validated phone number.
    ///
    /// # Arguments
    /// * `phone` - Raw phone string (surrounding whitespace is trimmed)
    ///
    /// # Returns
    /// Validated PhoneNumber value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Number does not match the regional pattern
    pub fn new(phone: String) -> Result<Self, PhoneError> {
        let phone = phone.trim().to_string();
        if phone_pattern().is_match(&phone) {
            Ok(Self(phone))
        } else {
            Err(PhoneError::InvalidFormat)
        }
    }

    /// Get phone number as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A contact channel a subject can be reached (and looked up) through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    Email(EmailAddress),
    Phone(PhoneNumber),
}

impl Contact {
    /// Parse a raw login contact.
    ///
    /// Anything containing `@` is held to email rules; everything else to
    /// the regional phone pattern.
    ///
    /// # Arguments
    /// * `raw` - Raw contact string as supplied by the caller
    ///
    /// # Returns
    /// Validated Contact
    ///
    /// # Errors
    /// * `InvalidEmail` / `InvalidPhone` - Contact is not well-formed
    pub fn parse(raw: &str) -> Result<Self, ContactError> {
        if raw.contains('@') {
            Ok(Contact::Email(EmailAddress::new(raw.to_string())?))
        } else {
            Ok(Contact::Phone(PhoneNumber::new(raw.to_string())?))
        }
    }

    /// Get the contact as string slice.
    pub fn as_str(&self) -> &str {
        match self {
            Contact::Email(email) => email.as_str(),
            Contact::Phone(phone) => phone.as_str(),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to create a new subject with domain types
#[derive(Debug)]
pub struct CreateSubjectCommand {
    pub display_name: Option<String>,
    pub email_address: Option<EmailAddress>,
    pub phone_number: Option<PhoneNumber>,
}

impl CreateSubjectCommand {
    /// Construct a new create subject command.
    ///
    /// # Arguments
    /// * `display_name` - Optional display name
    /// * `email_address` - Optional validated email
    /// * `phone_number` - Optional validated phone number
    ///
    /// The service rejects commands carrying neither contact channel.
    pub fn new(
        display_name: Option<String>,
        email_address: Option<EmailAddress>,
        phone_number: Option<PhoneNumber>,
    ) -> Self {
        Self {
            display_name,
            email_address,
            phone_number,
        }
    }
}

/// Command to update an existing subject with optional validated fields.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug)]
pub struct UpdateSubjectCommand {
    pub display_name: Option<String>,
    pub email_address: Option<EmailAddress>,
    pub phone_number: Option<PhoneNumber>,
    pub image_path: Option<String>,
}
