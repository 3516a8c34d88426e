//! The ordered, append-only project catalog.

use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::project::Project;

/// Fields for a project that has not been assigned an id yet.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
}

/// Ordered collection of projects, unique by id, in insertion order.
///
/// The catalog only grows: there is no removal or reordering, which is what
/// makes `len + 1` a collision-free id.
#[derive(Debug, Default)]
pub struct Catalog {
    projects: Vec<Arc<Project>>,
}

impl Catalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The three fixed projects the site starts with.
    pub fn seed() -> Self {
        let mut catalog = Self::new();
        for draft in seed_projects() {
            // Seed data is static and known to be valid.
            if let Err(e) = catalog.append(draft) {
                tracing::error!(error = %e, "invalid seed project");
            }
        }
        catalog
    }

    /// Load a catalog from a `projects.json` file (an array of project records).
    ///
    /// Ids must run `1..=n` in file order so that later appends keep the
    /// `len + 1` scheme.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Parse a catalog from a JSON array of project records.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let records = value
            .as_array()
            .ok_or_else(|| Error::invalid("project data must be a JSON array"))?;

        let mut catalog = Self::new();
        for record in records {
            let project = Project::from_json(record)?;
            let expected = catalog.next_id();
            if project.id() != expected {
                return Err(Error::InvalidProjectData(format!(
                    "expected project id {expected}, found {}",
                    project.id()
                )));
            }
            catalog.projects.push(Arc::new(project));
        }
        Ok(catalog)
    }

    /// Id the next appended project will receive.
    pub fn next_id(&self) -> u64 {
        self.projects.len() as u64 + 1
    }

    /// Create a project from `draft` with the next id and add it to the end.
    ///
    /// On error the catalog is left unchanged.
    pub fn append(&mut self, draft: NewProject) -> Result<Arc<Project>> {
        let project = Project::create(
            self.next_id(),
            draft.title,
            draft.description,
            draft.tech_stack,
            draft.category,
            draft.image,
        )?
        .with_link(draft.link);

        let project = Arc::new(project);
        self.projects.push(Arc::clone(&project));
        tracing::info!(
            id = project.id(),
            title = %project.title(),
            category = %project.category(),
            "project added to catalog"
        );
        Ok(project)
    }

    /// All projects in insertion order.
    pub fn all(&self) -> &[Arc<Project>] {
        &self.projects
    }

    /// Look up a project by id.
    pub fn find_by_id(&self, id: u64) -> Option<Arc<Project>> {
        self.projects.iter().find(|p| p.id() == id).cloned()
    }

    /// Like [`Catalog::find_by_id`] but with a [`Error::NotFound`] on a miss.
    pub fn require(&self, id: u64) -> Result<Arc<Project>> {
        self.find_by_id(id).ok_or(Error::NotFound(id))
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for project in &self.projects {
            if !seen.contains(&project.category()) {
                seen.push(project.category());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// JSON array of every project, in order.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.projects.iter().map(|p| p.to_json()).collect())
    }
}

fn seed_projects() -> Vec<NewProject> {
    let techs = |names: &[&str]| -> Vec<String> { names.iter().map(|s| (*s).to_string()).collect() };
    vec![
        NewProject {
            title: "Tri and Succeed Sports".to_string(),
            description: "Worked on website layout and text styling. Adjusted fonts, images, and positioning.".to_string(),
            tech_stack: techs(&["HTML", "CSS"]),
            category: Some("Web Development".to_string()),
            image: Some("images/tss_logo.png".to_string()),
            link: None,
        },
        NewProject {
            title: "Trusted Friends DayCare".to_string(),
            description: "Styled the website for different screen sizes (responsive design).".to_string(),
            tech_stack: techs(&["HTML", "CSS", "Responsive Design"]),
            category: Some("Responsive Design".to_string()),
            image: Some("images/tf_logo.png".to_string()),
            link: None,
        },
        NewProject {
            title: "Slate & Pencil Tutoring".to_string(),
            description: "Utilized grid layouts for better positioning and website organization.".to_string(),
            tech_stack: techs(&["HTML", "CSS", "Grid Layout"]),
            category: Some("UI/UX Design".to_string()),
            image: Some("images/slate-and-pencil_logo.png".to_string()),
            link: None,
        },
    ]
}
