//! CSRF tokens for form submissions.
//!
//! A token is generated whenever a page with a form is rendered, stored in the
//! visitor's session and mirrored into a hidden form field named
//! [`CSRF_FIELD`]. Submissions are accepted only when the posted field equals
//! the stored token.

use subtle::ConstantTimeEq;
use thiserror::Error;
use uuid::Uuid;

/// Name of the hidden form field carrying the token.
pub const CSRF_FIELD: &str = "csrfToken";

/// Token verification failure. Both variants render the same message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CsrfError {
    /// The form or the session carried no token.
    #[error("CSRF token mismatch. Submission blocked.")]
    Missing,

    /// The form's token differs from the session's.
    #[error("CSRF token mismatch. Submission blocked.")]
    Mismatch,
}

/// Fresh random token (UUID v4).
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}

/// Check a submitted token against the stored one.
pub fn verify(submitted: Option<&str>, stored: Option<&str>) -> Result<(), CsrfError> {
    let (Some(submitted), Some(stored)) = (submitted, stored) else {
        return Err(CsrfError::Missing);
    };
    if submitted.is_empty() || stored.is_empty() {
        return Err(CsrfError::Missing);
    }
    if bool::from(submitted.as_bytes().ct_eq(stored.as_bytes())) {
        Ok(())
    } else {
        Err(CsrfError::Mismatch)
    }
}
