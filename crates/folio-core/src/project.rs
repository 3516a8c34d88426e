//! The project entity: one portfolio item.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use crate::error::{Error, Result};

/// Category assigned when none is supplied.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Preview image used when none is supplied.
pub const DEFAULT_IMAGE: &str = "images/default-placeholder.svg";

/// A portfolio item.
///
/// Identity and descriptive fields are fixed at construction. The view counter
/// is the only mutable state and is only reachable through
/// [`Project::increment_views`], so a project can be shared behind an `Arc`
/// while detail pages are being rendered.
#[derive(Debug)]
pub struct Project {
    id: u64,
    title: String,
    description: String,
    tech_stack: Vec<String>,
    category: String,
    image: String,
    link: Option<String>,
    views: AtomicU64,
}

impl Project {
    /// Build a project, validating the required fields.
    ///
    /// Fails with [`Error::InvalidProjectData`] when `id` is zero or `title` /
    /// `description` is blank. A missing or blank `category` becomes
    /// [`DEFAULT_CATEGORY`]; a missing or blank `image` becomes [`DEFAULT_IMAGE`].
    pub fn create(
        id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        tech_stack: Vec<String>,
        category: Option<String>,
        image: Option<String>,
    ) -> Result<Self> {
        let title = title.into();
        let description = description.into();

        if id == 0 {
            return Err(Error::invalid("id must be a positive integer"));
        }
        if title.trim().is_empty() {
            return Err(Error::invalid("title is required"));
        }
        if description.trim().is_empty() {
            return Err(Error::invalid("description is required"));
        }

        let category = category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let image = image
            .filter(|i| !i.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE.to_string());

        Ok(Self {
            id,
            title,
            description,
            tech_stack,
            category,
            image,
            link: None,
            views: AtomicU64::new(0),
        })
    }

    /// Build a project from a record in the `projects.json` layout.
    ///
    /// ```json
    /// { "id": 1, "title": "...", "description": "...",
    ///   "techStack": ["HTML"], "category": "...", "image": "..." }
    /// ```
    ///
    /// `techStack` may be omitted (empty stack) but must be an array of
    /// strings when present.
    pub fn from_json(value: &Value) -> Result<Self> {
        let record = value
            .as_object()
            .ok_or_else(|| Error::invalid("project record must be an object"))?;

        let text = |key: &str| record.get(key).and_then(Value::as_str).map(str::to_string);

        let tech_stack = match record.get("techStack") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| Error::invalid("techStack entries must be strings"))
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(Error::invalid("techStack must be an array")),
        };

        let id = record.get("id").and_then(Value::as_u64).unwrap_or(0);

        let project = Self::create(
            id,
            text("title").unwrap_or_default(),
            text("description").unwrap_or_default(),
            tech_stack,
            text("category"),
            text("image"),
        )?;

        Ok(project.with_link(text("link")))
    }

    /// Attach the project's external link.
    #[must_use]
    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link.filter(|l| !l.trim().is_empty());
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Technologies in display order.
    pub fn tech_stack(&self) -> &[String] {
        &self.tech_stack
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Image reference: a path relative to the static assets, an absolute
    /// path (uploads), or an http(s) URL.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Whether `tech` is one of this project's technologies (exact match).
    ///
    /// Blank input is not an error; it simply matches nothing.
    pub fn uses_technology(&self, tech: &str) -> bool {
        if tech.trim().is_empty() {
            tracing::warn!(project_id = self.id, "invalid technology input");
            return false;
        }
        self.tech_stack.iter().any(|t| t == tech)
    }

    /// Record one view of the project's detail panel.
    pub fn increment_views(&self) {
        self.views.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of recorded detail views.
    pub fn views(&self) -> u64 {
        self.views.load(Ordering::Relaxed)
    }

    /// JSON form used by the data endpoints.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "title": self.title,
            "description": self.description,
            "techStack": self.tech_stack,
            "category": self.category,
            "image": self.image,
            "link": self.link,
            "views": self.views(),
        })
    }
}
