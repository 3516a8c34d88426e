//! Contact form validation and resubmission throttling.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::csrf::{self, CsrfError};
use crate::sanitize::sanitize;

/// Minimum message length, in characters.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Default wait between two accepted submissions from one session.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(30);

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").unwrap());

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Raw contact form fields as posted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "csrfToken")]
    pub csrf_token: Option<String>,
}

/// A sanitized, validated contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Why a contact submission was rejected. `Display` is the message shown to
/// the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please fill out all fields.")]
    MissingFields,

    #[error(transparent)]
    Csrf(#[from] CsrfError),

    #[error("Name can only contain letters and spaces.")]
    InvalidName,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Message must be at least 10 characters long.")]
    MessageTooShort,

    #[error("Please wait before submitting again.")]
    RateLimited { retry_after: Duration },
}

/// Sanitize and validate a contact submission.
///
/// Checks run in a fixed order: required fields, CSRF token, name, email,
/// message length. The first failure wins.
pub fn validate(form: &ContactForm, stored_token: Option<&str>) -> Result<ContactMessage, ContactError> {
    let name = sanitize(&form.name);
    let email = sanitize(&form.email);
    let message = sanitize(&form.message);

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ContactError::MissingFields);
    }

    csrf::verify(form.csrf_token.as_deref(), stored_token)?;

    if !NAME_RE.is_match(&name) {
        tracing::debug!("contact name rejected");
        return Err(ContactError::InvalidName);
    }
    if !EMAIL_RE.is_match(&email) {
        tracing::debug!("contact email rejected");
        return Err(ContactError::InvalidEmail);
    }
    if message.chars().count() < MIN_MESSAGE_CHARS {
        tracing::debug!("contact message too short");
        return Err(ContactError::MessageTooShort);
    }

    Ok(ContactMessage {
        name,
        email,
        message,
    })
}

/// Minimum spacing between accepted submissions.
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    window: Duration,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Reject when the previous accepted submission was less than the window ago.
    pub fn check(&self, last: Option<Instant>, now: Instant) -> Result<(), ContactError> {
        let Some(last) = last else {
            return Ok(());
        };
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.window {
            return Err(ContactError::RateLimited {
                retry_after: self.window - elapsed,
            });
        }
        Ok(())
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}
