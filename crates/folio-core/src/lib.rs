//! Core types and validation for the Folio portfolio site.
//!
//! This crate provides:
//! - The [`Project`] entity and the append-only [`Catalog`]
//! - Category filtering over the catalog
//! - HTML escaping and input sanitization
//! - CSRF token generation and verification
//! - Validation for the contact and "add project" forms
//!
//! It has no HTTP or rendering dependencies; `folio-site` builds the pages.

pub mod catalog;
pub mod contact;
pub mod csrf;
mod error;
pub mod filter;
pub mod project;
pub mod sanitize;
pub mod submission;

pub use catalog::{Catalog, NewProject};
pub use error::{Error, Result};
pub use filter::{ALL_CATEGORIES, CategoryFilter, filter, filter_by, filter_options};
pub use project::{DEFAULT_CATEGORY, DEFAULT_IMAGE, Project};
pub use sanitize::{escape_html, sanitize};
