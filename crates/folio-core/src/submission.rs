//! Validation for the "add project" form.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::catalog::NewProject;
use crate::csrf::{self, CsrfError};

/// Categories offered by the form's category select, in display order.
pub const PROJECT_CATEGORIES: [&str; 3] = ["Web Development", "UI/UX Design", "Responsive Design"];

/// Accepted MIME types for the optional preview image.
pub const ALLOWED_IMAGE_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

/// Minimum description length, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Optional scheme, then one or more `label.tld` groups. Only the prefix has
/// to match.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?://)?([A-Za-z0-9_\-]+\.+[A-Za-z]{2,})+/?").unwrap());

/// An uploaded image file.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Raw form fields as posted.
#[derive(Debug, Clone, Default)]
pub struct ProjectSubmission {
    pub title: String,
    pub category: String,
    pub description: String,
    /// Comma-separated technology names.
    pub technologies: String,
    pub project_link: String,
    pub image: Option<ImageUpload>,
    pub csrf_token: Option<String>,
}

/// A submission that passed validation. `draft.image` is left empty: the
/// caller stores `image` first and fills in the resulting reference.
#[derive(Debug, Clone)]
pub struct ValidSubmission {
    pub draft: NewProject,
    pub image: Option<ImageUpload>,
}

/// Why a project submission was rejected. `Display` is the message shown to
/// the visitor.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Csrf(#[from] CsrfError),

    #[error("All fields are required!")]
    MissingFields,

    #[error("Project description must be at least 10 characters long!")]
    DescriptionTooShort,

    #[error("Enter a valid project URL!")]
    InvalidLink,

    #[error("Only PNG and JPEG images are allowed!")]
    UnsupportedImage,

    /// The catalog refused the project.
    #[error("Could not add project: {0}")]
    Rejected(#[from] crate::error::Error),
}

/// Split a comma-separated technology list, trimming names and dropping empties.
pub fn split_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether `link` looks like a project URL.
pub fn is_valid_link(link: &str) -> bool {
    LINK_RE.is_match(link)
}

/// Validate a submission.
///
/// Order: CSRF token, required fields, description length, link format,
/// image type. The first failure wins.
pub fn validate(
    submission: ProjectSubmission,
    stored_token: Option<&str>,
) -> Result<ValidSubmission, SubmissionError> {
    csrf::verify(submission.csrf_token.as_deref(), stored_token)?;

    let title = submission.title.trim();
    let description = submission.description.trim();
    let link = submission.project_link.trim();
    let tech_stack = split_technologies(&submission.technologies);

    if title.is_empty() || description.is_empty() || tech_stack.is_empty() || link.is_empty() {
        return Err(SubmissionError::MissingFields);
    }

    tracing::debug!(
        title = %title,
        category = %submission.category,
        technologies = ?tech_stack,
        link = %link,
        image = submission.image.as_ref().map_or("none", |i| i.file_name.as_str()),
        "validating project submission"
    );

    if description.chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(SubmissionError::DescriptionTooShort);
    }
    if !is_valid_link(link) {
        return Err(SubmissionError::InvalidLink);
    }
    if let Some(image) = &submission.image {
        if !ALLOWED_IMAGE_TYPES.contains(&image.content_type.as_str()) {
            return Err(SubmissionError::UnsupportedImage);
        }
    }

    let draft = NewProject {
        title: title.to_string(),
        description: description.to_string(),
        tech_stack,
        category: Some(submission.category.trim().to_string()),
        image: None,
        link: Some(link.to_string()),
    };

    Ok(ValidSubmission {
        draft,
        image: submission.image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "tok";

    fn submission() -> ProjectSubmission {
        ProjectSubmission {
            title: "  Demo  ".to_string(),
            category: "Web Development".to_string(),
            description: "A demonstration project".to_string(),
            technologies: "Rust, HTML ,, CSS".to_string(),
            project_link: "https://example.com".to_string(),
            image: None,
            csrf_token: Some(TOKEN.to_string()),
        }
    }

    fn png() -> ImageUpload {
        ImageUpload {
            file_name: "shot.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[test]
    fn valid_submission_builds_draft() {
        let valid = validate(submission(), Some(TOKEN)).unwrap();
        assert_eq!(valid.draft.title, "Demo");
        assert_eq!(valid.draft.tech_stack, vec!["Rust", "HTML", "CSS"]);
        assert_eq!(valid.draft.category.as_deref(), Some("Web Development"));
        assert_eq!(valid.draft.link.as_deref(), Some("https://example.com"));
        assert!(valid.draft.image.is_none());
        assert!(valid.image.is_none());
    }

    #[test]
    fn csrf_checked_first() {
        let mut s = submission();
        s.title.clear();
        s.csrf_token = Some("wrong".to_string());
        assert!(matches!(
            validate(s, Some(TOKEN)),
            Err(SubmissionError::Csrf(CsrfError::Mismatch))
        ));
    }

    #[test]
    fn every_required_field() {
        let clears: [fn(&mut ProjectSubmission); 4] = [
            |s| s.title = " ".to_string(),
            |s| s.description.clear(),
            |s| s.technologies = " , ,".to_string(),
            |s| s.project_link.clear(),
        ];
        for clear in clears {
            let mut s = submission();
            clear(&mut s);
            assert!(matches!(
                validate(s, Some(TOKEN)),
                Err(SubmissionError::MissingFields)
            ));
        }
    }

    #[test]
    fn short_description() {
        let mut s = submission();
        s.description = "too short".to_string();
        let err = validate(s, Some(TOKEN)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Project description must be at least 10 characters long!"
        );
    }

    #[test]
    fn link_formats() {
        for good in [
            "https://example.com",
            "http://my-site.co.uk/path",
            "example.org",
            "www.example.dev/",
        ] {
            assert!(is_valid_link(good), "{good}");
        }
        for bad in ["not a url", "localhost", "ftp//x", "example.c"] {
            assert!(!is_valid_link(bad), "{bad}");
        }
    }

    #[test]
    fn invalid_link_rejected() {
        let mut s = submission();
        s.project_link = "nowhere".to_string();
        assert!(matches!(
            validate(s, Some(TOKEN)),
            Err(SubmissionError::InvalidLink)
        ));
    }

    #[test]
    fn image_types() {
        let mut s = submission();
        s.image = Some(png());
        assert!(validate(s, Some(TOKEN)).unwrap().image.is_some());

        let mut s = submission();
        s.image = Some(ImageUpload {
            content_type: "image/jpeg".to_string(),
            ..png()
        });
        assert!(validate(s, Some(TOKEN)).is_ok());

        let mut s = submission();
        s.image = Some(ImageUpload {
            content_type: "image/gif".to_string(),
            ..png()
        });
        let err = validate(s, Some(TOKEN)).unwrap_err();
        assert_eq!(err.to_string(), "Only PNG and JPEG images are allowed!");
    }

    #[test]
    fn split_technologies_trims_and_drops_empty() {
        assert_eq!(split_technologies("a, b ,c"), vec!["a", "b", "c"]);
        assert!(split_technologies("").is_empty());
        assert!(split_technologies(" , ").is_empty());
    }
}
