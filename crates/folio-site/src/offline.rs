//! Cache-first offline asset cache.
//!
//! Static assets are served through [`OfflineCache`]:
//!
//! 1. A manifest of asset paths is loaded at startup ([`OfflineCache::install`]),
//!    all or nothing
//! 2. Requests are answered from the cache when an entry exists
//! 3. Otherwise the [`AssetSource`] is asked; successful responses for the
//!    project data file ([`DATA_FILE`]) are kept for next time
//! 4. If the source is unavailable and the request is for JSON, an empty
//!    JSON array is returned instead of an error
//!
//! Entries never expire; a new cache name (e.g. `portfolio-cache-v2`) is how
//! a deployment invalidates them.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use axum::body::Bytes;
use moka::future::Cache;

/// Data file that is cached opportunistically after a successful fetch.
pub const DATA_FILE: &str = "projects.json";

/// Upper bound on cached assets.
const OFFLINE_CACHE_CAPACITY: u64 = 1_000;

/// A static asset body with its content type.
#[derive(Debug, Clone)]
pub struct Asset {
    pub body: Bytes,
    pub content_type: &'static str,
}

impl Asset {
    pub fn new(body: impl Into<Bytes>, content_type: &'static str) -> Self {
        Self {
            body: body.into(),
            content_type,
        }
    }

    /// JSON body served when the data file cannot be reached.
    pub fn empty_json_array() -> Self {
        Self::new(Bytes::from_static(b"[]"), "application/json")
    }
}

/// Cached asset with metadata.
#[derive(Debug, Clone)]
pub struct CachedAsset {
    pub asset: Asset,
    /// When this entry was cached.
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

/// Where a fetched asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Source,
    /// Source unavailable; empty JSON array substituted.
    Fallback,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "hit",
            Self::Source => "miss",
            Self::Fallback => "fallback",
        }
    }
}

/// Result of [`OfflineCache::fetch`].
#[derive(Debug, Clone)]
pub struct Fetched {
    pub asset: Asset,
    pub origin: Origin,
}

/// Asset lookup failure.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The source is reachable but has no such asset.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The source could not be reached.
    #[error("asset source unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    /// The path escapes the asset root or is otherwise unusable.
    #[error("invalid asset path: {0}")]
    InvalidPath(String),
}

/// Pre-cache failure. Nothing is cached when this is returned.
#[derive(Debug, thiserror::Error)]
#[error("failed to pre-cache {path}: {source}")]
pub struct InstallError {
    pub path: String,
    #[source]
    pub source: FetchError,
}

/// Where assets come from when they are not cached.
pub trait AssetSource: Send + Sync + 'static {
    /// Fetch the asset at a normalized path (leading `/`, no `..`).
    fn fetch(&self, path: &str) -> impl Future<Output = Result<Asset, FetchError>> + Send;
}

/// Assets read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirSource {
    async fn fetch(&self, path: &str) -> Result<Asset, FetchError> {
        let relative = path.trim_start_matches('/');
        let file = self.root.join(relative);

        match tokio::fs::read(&file).await {
            Ok(bytes) => Ok(Asset::new(bytes, content_type_for(relative))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // A missing root means the source itself is gone.
                if tokio::fs::try_exists(&self.root).await.unwrap_or(false) {
                    Err(FetchError::NotFound(path.to_string()))
                } else {
                    Err(FetchError::Unavailable(e))
                }
            }
            Err(e) => Err(FetchError::Unavailable(e)),
        }
    }
}

/// Versioned cache-first asset cache over an [`AssetSource`].
pub struct OfflineCache<S> {
    name: String,
    source: S,
    entries: Cache<String, CachedAsset>,
}

impl<S: AssetSource> OfflineCache<S> {
    pub fn new(name: impl Into<String>, source: S) -> Self {
        let entries = Cache::builder().max_capacity(OFFLINE_CACHE_CAPACITY).build();
        Self {
            name: name.into(),
            source,
            entries,
        }
    }

    /// Versioned cache name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch every manifest path from the source and cache them.
    ///
    /// All assets are fetched before any is inserted, so a single failure
    /// leaves the cache untouched.
    pub async fn install(&self, manifest: &[String]) -> Result<usize, InstallError> {
        let mut fetched = Vec::with_capacity(manifest.len());
        for path in manifest {
            let key = normalize_path(path).map_err(|source| InstallError {
                path: path.clone(),
                source,
            })?;
            let asset = self
                .source
                .fetch(&key)
                .await
                .map_err(|source| InstallError {
                    path: path.clone(),
                    source,
                })?;
            fetched.push((key, asset));
        }

        let count = fetched.len();
        for (key, asset) in fetched {
            self.store(key, asset).await;
        }

        tracing::info!(cache = %self.name, assets = count, "offline cache installed");
        Ok(count)
    }

    /// Serve `path` cache-first, falling back to the source.
    pub async fn fetch(&self, path: &str) -> Result<Fetched, FetchError> {
        let key = normalize_path(path)?;

        if let Some(entry) = self.entries.get(&key).await {
            tracing::debug!(path = %key, cached_at = %entry.cached_at, "offline cache hit");
            return Ok(Fetched {
                asset: entry.asset,
                origin: Origin::Cache,
            });
        }

        match self.source.fetch(&key).await {
            Ok(asset) => {
                if key.contains(DATA_FILE) {
                    tracing::debug!(path = %key, "caching data file");
                    self.store(key, asset.clone()).await;
                }
                Ok(Fetched {
                    asset,
                    origin: Origin::Source,
                })
            }
            Err(FetchError::Unavailable(e)) if key.ends_with(".json") => {
                tracing::warn!(path = %key, error = %e, "source unavailable, serving empty JSON");
                Ok(Fetched {
                    asset: Asset::empty_json_array(),
                    origin: Origin::Fallback,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Whether `path` currently has a cache entry.
    pub fn contains(&self, path: &str) -> bool {
        normalize_path(path).is_ok_and(|key| self.entries.contains_key(&key))
    }

    async fn store(&self, key: String, asset: Asset) {
        let entry = CachedAsset {
            asset,
            cached_at: chrono::Utc::now(),
        };
        self.entries.insert(key, entry).await;
    }
}

/// Normalize a request path to the cache key form: leading `/`, no empty or
/// `.` segments, no `..`. `/` maps to `/index.html`.
pub fn normalize_path(path: &str) -> Result<String, FetchError> {
    let trimmed = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments = Vec::new();
    for component in Path::new(trimmed.trim_start_matches('/')).components() {
        match component {
            Component::Normal(segment) => match segment.to_str() {
                Some(s) => segments.push(s),
                None => return Err(FetchError::InvalidPath(path.to_string())),
            },
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(FetchError::InvalidPath(path.to_string()));
            }
        }
    }
    if segments.is_empty() {
        return Ok("/index.html".to_string());
    }
    Ok(format!("/{}", segments.join("/")))
}

/// Content type from a file extension.
pub fn content_type_for(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "webmanifest" => "application/manifest+json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
