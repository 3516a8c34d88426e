//! HTML rendering for the portfolio pages.
//!
//! Rendering is split in two layers. The card, detail and form modules are
//! pure mappings from projects to maud `Markup`. The functions in this module
//! place that markup into the named containers a page declares
//! ([`Containers`]), mirroring how each page only has some of the
//! `projectList` / `projectContainer` / `projectDetails` targets.
//!
//! All dynamic values go through maud's escaping; technology names are
//! escaped explicitly (see [`components::escaped_tech_list`]).

pub mod cards;
pub mod components;
pub mod detail;
pub mod forms;

use std::collections::BTreeMap;
use std::sync::Arc;

use folio_core::{Catalog, Project};
use maud::{Markup, html};

/// A named render target on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContainerId {
    /// Home page list of all projects.
    ProjectList,
    /// Projects page list, redrawn by the category filter.
    ProjectContainer,
    /// Projects page detail panel.
    ProjectDetails,
}

impl ContainerId {
    /// The element id the container renders with.
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::ProjectList => "projectList",
            Self::ProjectContainer => "projectContainer",
            Self::ProjectDetails => "projectDetails",
        }
    }
}

/// Rendering failures. Neither is fatal to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("container #{} not found", .0.dom_id())]
    MissingContainer(ContainerId),

    #[error("container #projectContainer not found for filtered projects")]
    ContainerMissingForFilter,
}

#[derive(Debug, Default)]
struct Slot {
    content: Option<Markup>,
    error: bool,
}

/// The set of render targets a page has, and what has been written into them.
#[derive(Debug, Default)]
pub struct Containers {
    slots: BTreeMap<ContainerId, Slot>,
}

impl Containers {
    /// A page with the given (initially empty) containers.
    pub fn new(ids: &[ContainerId]) -> Self {
        let slots = ids.iter().map(|id| (*id, Slot::default())).collect();
        Self { slots }
    }

    pub fn has(&self, id: ContainerId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Replace the content of `id`, clearing any error marker.
    pub fn replace(&mut self, id: ContainerId, content: Markup) -> Result<(), RenderError> {
        let slot = self
            .slots
            .get_mut(&id)
            .ok_or(RenderError::MissingContainer(id))?;
        slot.content = Some(content);
        slot.error = false;
        Ok(())
    }

    /// Replace the content of `id` and mark it as an error state.
    pub fn replace_error(&mut self, id: ContainerId, content: Markup) -> Result<(), RenderError> {
        self.replace(id, content)?;
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.error = true;
        }
        Ok(())
    }

    /// Whether `id` is currently showing an error state.
    pub fn is_error(&self, id: ContainerId) -> bool {
        self.slots.get(&id).is_some_and(|slot| slot.error)
    }

    /// Rendered inner content of `id`, if anything has been written.
    pub fn content(&self, id: ContainerId) -> Option<&Markup> {
        self.slots.get(&id).and_then(|slot| slot.content.as_ref())
    }

    /// The container element itself. Pages without `id` render nothing.
    pub fn render(&self, id: ContainerId) -> Markup {
        let Some(slot) = self.slots.get(&id) else {
            return html! {};
        };
        html! {
            div id=(id.dom_id()) class=[slot.error.then_some("error-message")] {
                @if let Some(content) = &slot.content {
                    (content)
                }
            }
        }
    }
}

/// Draw `projects` as cards into `projectList`, replacing what was there.
///
/// Without a `projectList` container this only logs a warning.
pub fn display_projects(containers: &mut Containers, projects: &[Arc<Project>]) {
    if !containers.has(ContainerId::ProjectList) {
        tracing::warn!(container = "projectList", "container not found, skipping render");
        return;
    }
    tracing::debug!(count = projects.len(), "rendering project list");
    if let Err(e) = containers.replace(ContainerId::ProjectList, cards::project_list(projects)) {
        tracing::warn!(error = %e, "error rendering project list");
    }
}

/// Draw filtered `projects` into `projectContainer`, replacing what was there.
///
/// Callers catch the error and keep rendering the rest of the page.
pub fn display_filtered_projects(
    containers: &mut Containers,
    projects: &[Arc<Project>],
) -> Result<(), RenderError> {
    if !containers.has(ContainerId::ProjectContainer) {
        tracing::error!(container = "projectContainer", "container not found for filtered projects");
        return Err(RenderError::ContainerMissingForFilter);
    }
    tracing::debug!(count = projects.len(), "rendering filtered projects");
    containers.replace(
        ContainerId::ProjectContainer,
        cards::filtered_list(projects),
    )
}

/// What [`load_project_details`] did.
#[derive(Debug, Clone)]
pub enum DetailOutcome {
    /// The project was rendered and its view count incremented.
    Shown(Arc<Project>),
    /// No project has that id; the not-found state is showing.
    NotFound,
    /// The page has no `projectDetails` container; nothing happened.
    NoContainer,
}

/// Show project `id` in `projectDetails`.
///
/// The container is checked before the lookup, so a page without one never
/// counts a view. Each call increments the view counter at most once.
pub fn load_project_details(containers: &mut Containers, catalog: &Catalog, id: u64) -> DetailOutcome {
    if !containers.has(ContainerId::ProjectDetails) {
        tracing::warn!(container = "projectDetails", "container not found, skipping render");
        return DetailOutcome::NoContainer;
    }

    let Some(project) = catalog.find_by_id(id) else {
        tracing::error!(id, "project not found");
        if let Err(e) = containers.replace_error(ContainerId::ProjectDetails, detail::not_found()) {
            tracing::warn!(error = %e, "error rendering not-found details");
        }
        return DetailOutcome::NotFound;
    };

    project.increment_views();
    tracing::info!(id, title = %project.title(), views = project.views(), "project viewed");
    if let Err(e) = containers.replace(ContainerId::ProjectDetails, detail::detail_panel(&project)) {
        tracing::warn!(error = %e, "error rendering project details");
    }
    DetailOutcome::Shown(project)
}
