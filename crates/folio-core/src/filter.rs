//! Category filtering over the catalog.

use std::fmt;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::project::Project;

/// Filter value that selects every project.
pub const ALL_CATEGORIES: &str = "All";

/// A parsed category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every project.
    #[default]
    All,
    /// Projects whose category equals this value exactly.
    Only(String),
}

impl CategoryFilter {
    /// Parse a filter value. `"All"` is the only special value; everything
    /// else is compared literally (case-sensitive, no trimming).
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => project.category() == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order-preserving subsequence of the catalog matching `category`.
///
/// `"All"` returns the whole catalog. The catalog is never modified.
pub fn filter(catalog: &Catalog, category: &str) -> Vec<Arc<Project>> {
    filter_by(catalog, &CategoryFilter::parse(category))
}

/// [`filter`] with an already-parsed filter.
pub fn filter_by(catalog: &Catalog, filter: &CategoryFilter) -> Vec<Arc<Project>> {
    catalog
        .all()
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}

/// Values offered by the filter control: `"All"` followed by every distinct
/// category in the catalog.
pub fn filter_options(catalog: &Catalog) -> Vec<String> {
    std::iter::once(ALL_CATEGORIES)
        .chain(catalog.categories())
        .map(str::to_string)
        .collect()
}
