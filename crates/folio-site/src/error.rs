//! Errors raised by the site's handlers.
//!
//! Each one becomes a small HTML page with the status code and a link that
//! leads the visitor back into the portfolio.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, PreEscaped, html};

use crate::render::components::ERROR_CSS;

/// Site error type.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The request could not be understood (bad path, malformed form).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The requested page, project or asset does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl SiteError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Where the error page sends the visitor next.
    fn way_back(&self) -> (&'static str, &'static str) {
        match self {
            Self::NotFound(_) => ("/projects", "Browse all projects"),
            _ => ("/", "Back to the portfolio"),
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status();
        let heading = match &self {
            Self::BadRequest(_) => "That request didn't work",
            Self::NotFound(_) => "Nothing here",
            Self::Internal(_) => "Something went wrong",
        };
        let detail = match &self {
            Self::BadRequest(msg) => format!("The site could not read what was sent ({msg})."),
            Self::NotFound(what) => format!("There is no {what} in this portfolio."),
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                "The portfolio hit an unexpected error. Try again in a moment.".to_string()
            }
        };
        let (href, label) = self.way_back();

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (status.as_u16()) " | " (heading) }
                    meta name="robots" content="noindex";
                    style { (PreEscaped(ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        p class="error-code" { (status.as_u16()) }
                        h1 { (heading) }
                        p { (detail) }
                        a href=(href) { (label) }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}
