//! Application state shared across all request handlers.

use std::sync::Arc;

use anyhow::Context;
use folio_core::Catalog;
use folio_core::contact::Cooldown;
use parking_lot::RwLock;

use crate::config::Config;
use crate::offline::{DirSource, OfflineCache};
use crate::session::SessionStore;
use crate::uploads::UploadStore;

/// Offline cache over the configured static directory.
pub type AssetCache = OfflineCache<DirSource>;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// The project catalog. Appends take the write lock; rendering reads.
    pub catalog: Arc<RwLock<Catalog>>,

    /// Per-visitor sessions (CSRF token, contact cooldown).
    pub sessions: SessionStore,

    /// Images uploaded with new projects.
    pub uploads: UploadStore,

    /// Cache-first static asset cache.
    pub assets: Arc<AssetCache>,

    /// Contact form resubmission cooldown.
    pub cooldown: Cooldown,
}

impl AppState {
    /// Create application state, seeding the catalog from `config.seed_path`
    /// when set and from the built-in projects otherwise.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let catalog = match &config.seed_path {
            Some(path) => Catalog::from_json_file(path)
                .with_context(|| format!("failed to load seed projects from {}", path.display()))?,
            None => Catalog::seed(),
        };
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create application state around an existing catalog.
    pub fn with_catalog(config: Config, catalog: Catalog) -> Self {
        for project in catalog.all() {
            tracing::debug!(
                id = project.id(),
                title = %project.title(),
                category = %project.category(),
                technologies = %project.tech_stack().join(", "),
                image = %project.image(),
                "seed project"
            );
        }

        let assets = OfflineCache::new(
            config.cache_name.clone(),
            DirSource::new(config.static_dir.clone()),
        );

        tracing::info!(
            projects = catalog.len(),
            cache_name = %config.cache_name,
            static_dir = %config.static_dir.display(),
            "application state initialized"
        );

        Self {
            cooldown: Cooldown::new(config.contact_cooldown),
            config: Arc::new(config),
            catalog: Arc::new(RwLock::new(catalog)),
            sessions: SessionStore::new(),
            uploads: UploadStore::new(),
            assets: Arc::new(assets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_seed() {
        let state = AppState::new(Config::local("static")).unwrap();
        assert_eq!(state.catalog.read().len(), 3);
        assert_eq!(state.assets.name(), "portfolio-cache-v1");
    }

    #[test]
    fn seed_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "title": "Only", "description": "The one project", "techStack": ["Rust"]}}]"#
        )
        .unwrap();

        let mut config = Config::local("static");
        config.seed_path = Some(file.path().to_path_buf());
        let state = AppState::new(config).unwrap();
        let catalog = state.catalog.read();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.all()[0].title(), "Only");
    }

    #[test]
    fn bad_seed_file_is_error() {
        let mut config = Config::local("static");
        config.seed_path = Some("/definitely/not/here.json".into());
        let err = AppState::new(config).err().unwrap();
        assert!(err.to_string().contains("failed to load seed projects"));
    }
}
