//! Projects pages and the add-project submission.
//!
//! `GET /projects` shows the category filter and the filtered list.
//! `GET /projects/{id}` adds the detail panel for one project; with a `.json`
//! suffix it returns that project as JSON instead.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use folio_core::csrf::CSRF_FIELD;
use folio_core::submission::{self, ImageUpload, ProjectSubmission, SubmissionError, ValidSubmission};
use folio_core::{CategoryFilter, filter_by, filter_options};
use maud::html;
use serde::Deserialize;

use crate::error::SiteError;
use crate::render::components::{Flash, Nav, page_shell};
use crate::render::{self, ContainerId, Containers, DetailOutcome, forms};
use crate::session::ActiveSession;
use crate::state::AppState;

use super::home::render_home;

/// Query parameters for the projects page.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
    #[serde(default)]
    pub category: Option<String>,
}

impl ProjectsQuery {
    /// An absent or empty `category` means "All"; anything else must match a
    /// category exactly.
    fn filter(&self) -> CategoryFilter {
        match self.category.as_deref() {
            None | Some("") => CategoryFilter::All,
            Some(category) => CategoryFilter::parse(category),
        }
    }
}

/// `GET /projects`
pub async fn projects_page(
    State(state): State<AppState>,
    Query(query): Query<ProjectsQuery>,
) -> Response {
    render_projects(&state, &query.filter(), None)
}

/// `GET /projects/{identifier}`
pub async fn project_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Query(query): Query<ProjectsQuery>,
) -> Response {
    let identifier = identifier.trim();

    if let Some(bare) = identifier.strip_suffix(".json") {
        return project_json(&state, bare);
    }

    // ids start at 1, so anything unparsable resolves to "not found"
    let id = identifier.parse::<u64>().unwrap_or(0);
    render_projects(&state, &query.filter(), Some(id))
}

fn project_json(state: &AppState, identifier: &str) -> Response {
    let id = identifier.parse::<u64>().unwrap_or(0);
    match state.catalog.read().require(id) {
        Ok(project) => Json(project.to_json()).into_response(),
        Err(err) => {
            tracing::debug!(identifier = %identifier, error = %err, "project json not found");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": format!("project {identifier} not found") })),
            )
                .into_response()
        }
    }
}

/// Render the projects page: filter, filtered list and optional detail panel.
fn render_projects(state: &AppState, filter: &CategoryFilter, detail_id: Option<u64>) -> Response {
    let mut containers = Containers::new(&[ContainerId::ProjectContainer, ContainerId::ProjectDetails]);

    let (options, outcome) = {
        let catalog = state.catalog.read();
        let projects = filter_by(&catalog, filter);
        if let Err(e) = render::display_filtered_projects(&mut containers, &projects) {
            tracing::error!(error = %e, "error displaying filtered projects");
        }
        let outcome = detail_id.map(|id| render::load_project_details(&mut containers, &catalog, id));
        (filter_options(&catalog), outcome)
    };

    let (status, title, path) = match &outcome {
        Some(DetailOutcome::Shown(project)) => (
            StatusCode::OK,
            project.title().to_string(),
            format!("/projects/{}", project.id()),
        ),
        Some(DetailOutcome::NotFound) => (
            StatusCode::NOT_FOUND,
            "Project not found".to_string(),
            "/projects".to_string(),
        ),
        Some(DetailOutcome::NoContainer) | None => {
            (StatusCode::OK, "Projects".to_string(), "/projects".to_string())
        }
    };

    let body = html! {
        h1 { "Projects" }
        (forms::filter_control(&options, filter.as_str()))
        (containers.render(ContainerId::ProjectContainer))
        (containers.render(ContainerId::ProjectDetails))
    };

    let description = match &outcome {
        Some(DetailOutcome::Shown(project)) => project.description().to_string(),
        _ => format!("Portfolio projects ({}).", filter.as_str()),
    };

    let markup = page_shell(
        super::site_meta(&state.config),
        Nav::Projects,
        &title,
        &description,
        &path,
        body,
    );
    super::html_response(status, markup.into_string(), HeaderMap::new())
}

/// `POST /projects` (multipart).
pub async fn submit_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, SiteError> {
    let session = state.sessions.resolve(&headers).await;
    let submission = read_submission(multipart).await?;
    Ok(handle_submission(&state, &session, submission).await)
}

/// Collect the multipart fields of the add-project form.
///
/// A file input left empty arrives as a part with no file name and no bytes;
/// that is treated as "no image".
async fn read_submission(mut multipart: Multipart) -> Result<ProjectSubmission, SiteError> {
    let mut submission = ProjectSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SiteError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "projectImage" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| SiteError::BadRequest(e.to_string()))?;
            if !file_name.is_empty() || !bytes.is_empty() {
                submission.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| SiteError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "title" => submission.title = value,
            "category" => submission.category = value,
            "description" => submission.description = value,
            "technologies" => submission.technologies = value,
            "projectLink" => submission.project_link = value,
            CSRF_FIELD => submission.csrf_token = Some(value),
            other => tracing::debug!(field = %other, "ignoring unknown form field"),
        }
    }

    Ok(submission)
}

/// Validate a submission, append it and redraw the home page.
///
/// The redraw reads the catalog after the append returns, so the new project
/// is always in the list it renders.
pub(crate) async fn handle_submission(
    state: &AppState,
    session: &ActiveSession,
    submission: ProjectSubmission,
) -> Response {
    let stored = session.csrf_token();
    let values = sticky_values(&submission);

    let result = match submission::validate(submission, stored.as_deref()) {
        Ok(valid) => add_project(state, valid).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => render_home(
            state,
            session,
            StatusCode::OK,
            &ProjectSubmission::default(),
            Some(&Flash::success("Project added successfully!")),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "project submission rejected");
            let status = match err {
                SubmissionError::Csrf(_) => StatusCode::FORBIDDEN,
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            };
            render_home(state, session, status, &values, Some(&Flash::error(err.to_string())))
        }
    }
}

async fn add_project(state: &AppState, valid: ValidSubmission) -> Result<(), SubmissionError> {
    let ValidSubmission { mut draft, image } = valid;
    if let Some(image) = image {
        draft.image = Some(state.uploads.store(image).await);
    }
    let project = state.catalog.write().append(draft)?;
    tracing::info!(
        id = project.id(),
        title = %project.title(),
        category = %project.category(),
        "project added"
    );
    Ok(())
}

/// Text fields to put back into the form after a rejected submission.
fn sticky_values(submission: &ProjectSubmission) -> ProjectSubmission {
    ProjectSubmission {
        title: submission.title.clone(),
        category: submission.category.clone(),
        description: submission.description.clone(),
        technologies: submission.technologies.clone(),
        project_link: submission.project_link.clone(),
        image: None,
        csrf_token: None,
    }
}
