//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Assets pre-cached by default, relative to the static directory.
pub const DEFAULT_PRECACHE: &[&str] = &[
    "/manifest.json",
    "/projects.json",
    "/images/default-placeholder.svg",
];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Public base URL, used for canonical links.
    pub base_url: String,

    /// Site name shown in page titles and the header.
    pub site_name: String,

    /// Directory holding static assets served under `/static`.
    pub static_dir: PathBuf,

    /// Versioned name of the offline asset cache.
    pub cache_name: String,

    /// Asset paths loaded into the offline cache at startup.
    pub precache: Vec<String>,

    /// Minimum spacing between accepted contact submissions per session.
    pub contact_cooldown: Duration,

    /// Optional `projects.json` file replacing the built-in seed projects.
    pub seed_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - None (all have defaults for local development)
    ///
    /// Optional:
    /// - `FOLIO_BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `FOLIO_BASE_URL`: Base URL for canonical links (default: "http://localhost:8080")
    /// - `FOLIO_SITE_NAME`: Site name (default: "Portfolio")
    /// - `FOLIO_STATIC_DIR`: Static asset directory (default: "static")
    /// - `FOLIO_CACHE_NAME`: Offline cache name (default: "portfolio-cache-v1")
    /// - `FOLIO_PRECACHE`: Comma-separated asset paths to pre-cache
    /// - `FOLIO_CONTACT_COOLDOWN_SECS`: Contact resubmission cooldown (default: 30)
    /// - `FOLIO_SEED_PATH`: `projects.json` file to seed the catalog from
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("FOLIO_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let base_url = std::env::var("FOLIO_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_name =
            std::env::var("FOLIO_SITE_NAME").unwrap_or_else(|_| "Portfolio".to_string());

        let static_dir = PathBuf::from(
            std::env::var("FOLIO_STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        );

        let cache_name = std::env::var("FOLIO_CACHE_NAME")
            .unwrap_or_else(|_| "portfolio-cache-v1".to_string());

        let precache: Vec<String> = match std::env::var("FOLIO_PRECACHE") {
            Ok(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => DEFAULT_PRECACHE.iter().map(|s| (*s).to_string()).collect(),
        };

        let contact_cooldown = match std::env::var("FOLIO_CONTACT_COOLDOWN_SECS") {
            Ok(raw) => Duration::from_secs(raw.trim().parse().map_err(|e| {
                anyhow::anyhow!("FOLIO_CONTACT_COOLDOWN_SECS must be a whole number of seconds: {e}")
            })?),
            Err(_) => folio_core::contact::DEFAULT_COOLDOWN,
        };

        let seed_path = std::env::var("FOLIO_SEED_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            site_name = %site_name,
            static_dir = %static_dir.display(),
            cache_name = %cache_name,
            precache_count = precache.len(),
            contact_cooldown_secs = contact_cooldown.as_secs(),
            seed_path = ?seed_path,
            "site configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            site_name,
            static_dir,
            cache_name,
            precache,
            contact_cooldown,
            seed_path,
        })
    }

    /// Defaults without reading the environment.
    pub fn local(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            base_url: "http://localhost:8080".to_string(),
            site_name: "Portfolio".to_string(),
            static_dir: static_dir.into(),
            cache_name: "portfolio-cache-v1".to_string(),
            precache: Vec::new(),
            contact_cooldown: folio_core::contact::DEFAULT_COOLDOWN,
            seed_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize config tests that manipulate env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "FOLIO_BIND_ADDR",
        "FOLIO_BASE_URL",
        "FOLIO_SITE_NAME",
        "FOLIO_STATIC_DIR",
        "FOLIO_CACHE_NAME",
        "FOLIO_PRECACHE",
        "FOLIO_CONTACT_COOLDOWN_SECS",
        "FOLIO_SEED_PATH",
    ];

    /// Helper to run config tests with isolated env vars.
    fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_MUTEX.lock().unwrap();

        let saved: Vec<_> = ENV_KEYS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: Serialized by mutex; only test code touches these vars.
        unsafe {
            for k in ENV_KEYS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        // SAFETY: Restoring original env state.
        unsafe {
            for (k, v) in &saved {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn config_defaults() {
        with_env_vars(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.bind_addr, "0.0.0.0:8080");
            assert_eq!(config.base_url, "http://localhost:8080");
            assert_eq!(config.site_name, "Portfolio");
            assert_eq!(config.static_dir, PathBuf::from("static"));
            assert_eq!(config.cache_name, "portfolio-cache-v1");
            assert_eq!(config.precache, DEFAULT_PRECACHE);
            assert_eq!(config.contact_cooldown, Duration::from_secs(30));
            assert!(config.seed_path.is_none());
        });
    }

    #[test]
    fn config_custom_values() {
        with_env_vars(
            &[
                ("FOLIO_BIND_ADDR", "127.0.0.1:9090"),
                ("FOLIO_BASE_URL", "https://me.dev"),
                ("FOLIO_SITE_NAME", "My Work"),
                ("FOLIO_STATIC_DIR", "/srv/assets"),
                ("FOLIO_CACHE_NAME", "portfolio-cache-v2"),
                ("FOLIO_CONTACT_COOLDOWN_SECS", "5"),
                ("FOLIO_SEED_PATH", "/srv/projects.json"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr, "127.0.0.1:9090");
                assert_eq!(config.base_url, "https://me.dev");
                assert_eq!(config.site_name, "My Work");
                assert_eq!(config.static_dir, PathBuf::from("/srv/assets"));
                assert_eq!(config.cache_name, "portfolio-cache-v2");
                assert_eq!(config.contact_cooldown, Duration::from_secs(5));
                assert_eq!(config.seed_path, Some(PathBuf::from("/srv/projects.json")));
            },
        );
    }

    #[test]
    fn config_base_url_trailing_slash_stripped() {
        with_env_vars(&[("FOLIO_BASE_URL", "https://me.dev/")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.base_url, "https://me.dev");
        });
    }

    #[test]
    fn config_precache_parsing() {
        with_env_vars(&[("FOLIO_PRECACHE", " /a.css, ,/b.json ")], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.precache, vec!["/a.css", "/b.json"]);
        });
    }

    #[test]
    fn config_empty_precache() {
        with_env_vars(&[("FOLIO_PRECACHE", "")], || {
            let config = Config::from_env().unwrap();
            assert!(config.precache.is_empty());
        });
    }

    #[test]
    fn config_bad_cooldown_is_error() {
        with_env_vars(&[("FOLIO_CONTACT_COOLDOWN_SECS", "soon")], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("FOLIO_CONTACT_COOLDOWN_SECS"));
        });
    }

    #[test]
    fn config_blank_seed_path_ignored() {
        with_env_vars(&[("FOLIO_SEED_PATH", "  ")], || {
            let config = Config::from_env().unwrap();
            assert!(config.seed_path.is_none());
        });
    }
}
