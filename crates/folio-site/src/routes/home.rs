//! Home page: every project plus the add-project form.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use folio_core::submission::ProjectSubmission;
use maud::html;

use crate::render::components::{Flash, Nav, page_shell};
use crate::render::{self, ContainerId, Containers, forms};
use crate::session::ActiveSession;
use crate::state::AppState;

/// Render the home page.
pub async fn home_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.sessions.resolve(&headers).await;
    render_home(
        &state,
        &session,
        StatusCode::OK,
        &ProjectSubmission::default(),
        None,
    )
}

/// Render the home page for `session`, issuing a fresh CSRF token.
///
/// `values` pre-fills the add-project form and `flash` is shown above it.
pub(super) fn render_home(
    state: &AppState,
    session: &ActiveSession,
    status: StatusCode,
    values: &ProjectSubmission,
    flash: Option<&Flash>,
) -> Response {
    let token = session.issue_csrf_token();

    let mut containers = Containers::new(&[ContainerId::ProjectList]);
    let count = {
        let catalog = state.catalog.read();
        render::display_projects(&mut containers, catalog.all());
        catalog.len()
    };

    let config = &state.config;
    let body = html! {
        h1 { (config.site_name) }
        p { "A selection of projects. Browse them all on the "
            a href="/projects" { "projects page" } "." }
        section id="projects" {
            h2 { "Projects (" (count) ")" }
            (containers.render(ContainerId::ProjectList))
        }
        (forms::project_form(&token, values, flash))
    };

    let markup = page_shell(
        super::site_meta(config),
        Nav::Home,
        "Home",
        "Portfolio projects and a form to add new ones.",
        "/",
        body,
    );

    let mut extra = HeaderMap::new();
    session.apply_cookie(&mut extra);
    super::html_response(status, markup.into_string(), extra)
}
