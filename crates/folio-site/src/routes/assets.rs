//! Static assets (through the offline cache) and uploaded images.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::SiteError;
use crate::offline::{Asset, FetchError, Origin};
use crate::state::AppState;

/// `GET /static/{*path}`
///
/// The `X-Cache` header reports whether the asset came from the cache, the
/// source, or the empty-JSON fallback.
pub async fn static_asset(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, SiteError> {
    match state.assets.fetch(&path).await {
        Ok(fetched) => Ok(asset_response(fetched.asset, Some(fetched.origin))),
        Err(FetchError::NotFound(path)) => Err(SiteError::NotFound(path)),
        Err(FetchError::InvalidPath(path)) => {
            Err(SiteError::BadRequest(format!("invalid asset path: {path}")))
        }
        Err(err @ FetchError::Unavailable(_)) => Err(SiteError::Internal(err.into())),
    }
}

/// `GET /uploads/{id}`
pub async fn uploaded_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, SiteError> {
    let asset = state
        .uploads
        .get(&id)
        .await
        .ok_or_else(|| SiteError::NotFound(format!("upload {id}")))?;
    Ok(asset_response(asset, None))
}

fn asset_response(asset: Asset, origin: Option<Origin>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(asset.content_type),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::ETAG, super::etag(&asset.body));
    if let Some(origin) = origin {
        headers.insert("x-cache", HeaderValue::from_static(origin.as_str()));
    }
    let body: Bytes = asset.body;
    (StatusCode::OK, headers, body).into_response()
}
