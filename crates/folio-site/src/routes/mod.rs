//! Route definitions for the portfolio site.
//!
//! ## Routes
//!
//! - `GET /` - Home page (project list + add-project form)
//! - `POST /projects` - Add-project submission (multipart)
//! - `GET /projects` - Projects page with category filter (`?category=`)
//! - `GET /projects/{id}` - Projects page with one project's details (or `.json`)
//! - `GET /projects.json` - Whole catalog as JSON
//! - `GET /contact`, `POST /contact` - Contact form
//! - `GET /static/{*path}` - Static assets through the offline cache
//! - `GET /uploads/{id}` - Uploaded project images
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions

mod assets;
mod contact;
mod data;
mod health;
mod home;
mod projects;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::config::Config;
use crate::render;
use crate::render::components::SiteMeta;
use crate::state::AppState;

/// Largest accepted request body (project submissions carry an image).
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Build the complete site router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home_page))
        .route(
            "/projects",
            get(projects::projects_page).post(projects::submit_project),
        )
        .route("/projects.json", get(data::catalog_json))
        .route("/projects/{identifier}", get(projects::project_handler))
        .route(
            "/contact",
            get(contact::contact_page).post(contact::submit_contact),
        )
        .route("/static/{*path}", get(assets::static_asset))
        .route("/uploads/{id}", get(assets::uploaded_image))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers except on form endpoints.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\nDisallow: /contact\nDisallow: /uploads/\n",
    )
}

fn site_meta(config: &Config) -> SiteMeta<'_> {
    SiteMeta {
        site_name: &config.site_name,
        base_url: &config.base_url,
    }
}

/// Build an HTML response with security headers and an ETag.
///
/// `extra` is merged last (session cookie, `Retry-After`).
fn html_response(status: StatusCode, html: String, extra: HeaderMap) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(render::components::CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    // Pages embed a per-visitor CSRF token or live view counts.
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    // ETag (xxHash of content)
    headers.insert(header::ETAG, etag(html.as_bytes()));

    for (key, value) in extra.iter() {
        headers.insert(key.clone(), value.clone());
    }

    (status, headers, html).into_response()
}

/// Strong ETag from the xxh3 hash of `body`.
fn etag(body: &[u8]) -> HeaderValue {
    let hash = xxhash_rust::xxh3::xxh3_64(body);
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    // hex digits and quotes are always valid header bytes
    HeaderValue::from_str(&etag).unwrap_or_else(|_| HeaderValue::from_static("\"0\""))
}
