//! Contact page and submission.

use std::time::Instant;

use axum::Form;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::Response;
use folio_core::contact::{self, ContactError, ContactForm};
use maud::html;

use crate::render::components::{Flash, Nav, page_shell};
use crate::render::forms;
use crate::session::ActiveSession;
use crate::state::AppState;

/// `GET /contact`
pub async fn contact_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.sessions.resolve(&headers).await;
    render_contact(&state, &session, StatusCode::OK, &ContactForm::default(), None)
}

/// `POST /contact` (url-encoded).
pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ContactForm>,
) -> Response {
    let session = state.sessions.resolve(&headers).await;
    handle_contact(&state, &session, form, Instant::now())
}

/// Validate a contact submission and apply the per-session cooldown.
///
/// The cooldown starts only when a submission is accepted.
pub(crate) fn handle_contact(
    state: &AppState,
    session: &ActiveSession,
    form: ContactForm,
    now: Instant,
) -> Response {
    let stored = session.csrf_token();
    let result = contact::validate(&form, stored.as_deref()).and_then(|message| {
        session.claim_contact_slot(&state.cooldown, now)?;
        Ok(message)
    });

    match result {
        Ok(message) => {
            tracing::info!(
                name = %message.name,
                email = %message.email,
                chars = message.message.chars().count(),
                "contact message received"
            );
            render_contact(
                state,
                session,
                StatusCode::OK,
                &ContactForm::default(),
                Some(&Flash::success("Your message has been sent!")),
            )
        }
        Err(err) => {
            tracing::warn!(error = %err, "contact submission rejected");
            let status = match &err {
                ContactError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
                ContactError::Csrf(_) => StatusCode::FORBIDDEN,
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            };
            let mut response = render_contact(
                state,
                session,
                status,
                &ContactForm {
                    csrf_token: None,
                    ..form
                },
                Some(&Flash::error(err.to_string())),
            );
            if let ContactError::RateLimited { retry_after } = err {
                let secs = retry_after.as_secs().max(1);
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(secs));
            }
            response
        }
    }
}

fn render_contact(
    state: &AppState,
    session: &ActiveSession,
    status: StatusCode,
    values: &ContactForm,
    flash: Option<&Flash>,
) -> Response {
    let token = session.issue_csrf_token();
    let body = html! {
        h1 { "Contact" }
        p { "Questions about a project, or want to work together? Send a message." }
        (forms::contact_form(&token, values, flash))
    };
    let markup = page_shell(
        super::site_meta(&state.config),
        Nav::Contact,
        "Contact",
        "Get in touch.",
        "/contact",
        body,
    );

    let mut extra = HeaderMap::new();
    session.apply_cookie(&mut extra);
    super::html_response(status, markup.into_string(), extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::tests::{body_string, test_state};
    use std::time::Duration;

    fn form(token: Option<String>) -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            message: "I would like to hire you.".into(),
            csrf_token: token,
        }
    }

    async fn session(state: &AppState) -> ActiveSession {
        let session = state.sessions.resolve(&HeaderMap::new()).await;
        session.issue_csrf_token();
        session
    }

    #[tokio::test]
    async fn contact_page_renders_form() {
        let state = test_state();
        let response = contact_page(State(state), HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::SET_COOKIE));
        let body = body_string(response).await;
        assert!(body.contains(r#"id="contactForm""#));
        assert!(body.contains(r#"name="csrfToken""#));
    }

    #[tokio::test]
    async fn accepted_message() {
        let state = test_state();
        let session = session(&state).await;
        let now = Instant::now();
        let response = handle_contact(&state, &session, form(session.csrf_token()), now);
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Your message has been sent!"));
        assert_eq!(session.handle.lock().last_contact_submit, Some(now));
    }

    #[tokio::test]
    async fn resubmission_within_cooldown() {
        let state = test_state();
        let session = session(&state).await;
        let start = Instant::now();
        handle_contact(&state, &session, form(session.csrf_token()), start);

        let soon = start + Duration::from_secs(5);
        let response = handle_contact(&state, &session, form(session.csrf_token()), soon);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "25");
        assert!(body_string(response).await.contains("Please wait before submitting again."));

        let later = start + Duration::from_secs(31);
        let response = handle_contact(&state, &session, form(session.csrf_token()), later);
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn concurrent_submissions_accept_one() {
        let state = test_state();
        let session = session(&state).await;
        let token = session.csrf_token();
        let now = Instant::now();

        let statuses: Vec<StatusCode> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    let (state, session, token) = (&state, &session, token.clone());
                    scope.spawn(move || handle_contact(state, session, form(token), now).status())
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
        assert_eq!(
            statuses
                .iter()
                .filter(|s| **s == StatusCode::TOO_MANY_REQUESTS)
                .count(),
            7
        );
    }

    #[tokio::test]
    async fn rejected_message_does_not_start_cooldown() {
        let state = test_state();
        let session = session(&state).await;
        let mut bad = form(session.csrf_token());
        bad.name = "R2-D2".into();
        let response = handle_contact(&state, &session, bad, Instant::now());
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_string(response).await;
        assert!(body.contains("Name can only contain letters and spaces."));
        assert!(body.contains(r#"value="ada@example.com""#));
        assert!(session.handle.lock().last_contact_submit.is_none());
    }

    #[tokio::test]
    async fn stale_token_is_blocked() {
        let state = test_state();
        let session = session(&state).await;
        let old = session.csrf_token();
        session.issue_csrf_token();
        let response = handle_contact(&state, &session, form(old), Instant::now());
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(
            body_string(response)
                .await
                .contains("CSRF token mismatch. Submission blocked.")
        );
    }
}
