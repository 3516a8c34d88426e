//! The live catalog as JSON at `GET /projects.json`.
//!
//! Records use the same layout the seed file is read from, plus `link` and
//! `views`.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// `GET /projects.json`
pub async fn catalog_json(State(state): State<AppState>) -> Response {
    let body = state.catalog.read().to_json();
    let mut response = Json(body).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::tests::{body_string, test_state};

    #[tokio::test]
    async fn lists_catalog_in_order() {
        let state = test_state();
        let response = catalog_json(State(state)).await;
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let value: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        let ids: Vec<u64> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(value[0]["techStack"].is_array());
    }
}
