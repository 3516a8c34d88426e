//! Folio Site - a server-rendered portfolio.
//!
//! This crate serves a small portfolio: a list of projects, a category
//! filter, project detail pages, an "add project" form and a contact form.
//! The catalog lives in memory for the life of the process.
//!
//! # Architecture
//!
//! - **Catalog**: `folio-core` owns projects, filtering and form validation
//! - **Render**: maud templates write into the named containers a page declares
//! - **Sessions**: cookie-keyed moka cache holding the CSRF token and contact cooldown
//! - **Offline cache**: cache-first static assets with an empty-JSON fallback
//!
//! # Security
//!
//! - All dynamic content is HTML-escaped by maud; technology names are
//!   escaped explicitly, including `'`
//! - Both forms carry a per-session CSRF token that rotates on every render
//! - Strict Content-Security-Policy: no JavaScript execution
//! - X-Frame-Options: DENY prevents clickjacking

pub mod config;
pub mod error;
pub mod offline;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;
pub mod uploads;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
