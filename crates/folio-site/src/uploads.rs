//! In-memory storage for images uploaded with new projects.
//!
//! Uploads live only as long as the process (like the catalog they belong to)
//! and are served from `/uploads/{id}`.

use folio_core::submission::ImageUpload;
use moka::future::Cache;
use uuid::Uuid;

use crate::offline::Asset;

/// Total upload bytes kept before the least-used images are evicted.
const UPLOAD_CAPACITY_BYTES: u64 = 64 * 1024 * 1024;

/// URL prefix uploads are served under.
pub const UPLOAD_PREFIX: &str = "/uploads/";

/// Uploaded image store keyed by a random id.
#[derive(Clone)]
pub struct UploadStore {
    cache: Cache<String, Asset>,
}

impl UploadStore {
    pub fn new() -> Self {
        let cache = Cache::builder()
            .weigher(|_key: &String, asset: &Asset| {
                u32::try_from(asset.body.len()).unwrap_or(u32::MAX)
            })
            .max_capacity(UPLOAD_CAPACITY_BYTES)
            .build();
        Self { cache }
    }

    /// Keep `image` and return the URL it is served from.
    ///
    /// The content type must already be validated as PNG or JPEG.
    pub async fn store(&self, image: ImageUpload) -> String {
        let id = Uuid::new_v4().simple().to_string();
        let content_type = if image.content_type == "image/png" {
            "image/png"
        } else {
            "image/jpeg"
        };
        tracing::debug!(
            id = %id,
            file_name = %image.file_name,
            bytes = image.bytes.len(),
            "storing uploaded image"
        );
        self.cache
            .insert(id.clone(), Asset::new(image.bytes, content_type))
            .await;
        format!("{UPLOAD_PREFIX}{id}")
    }

    pub async fn get(&self, id: &str) -> Option<Asset> {
        self.cache.get(id).await
    }
}

impl Default for UploadStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_and_get() {
        let store = UploadStore::new();
        let url = store
            .store(ImageUpload {
                file_name: "shot.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: vec![0xff, 0xd8, 0xff],
            })
            .await;
        let id = url.strip_prefix(UPLOAD_PREFIX).unwrap();
        let asset = store.get(id).await.unwrap();
        assert_eq!(asset.content_type, "image/jpeg");
        assert_eq!(&asset.body[..], &[0xff, 0xd8, 0xff]);
    }

    #[tokio::test]
    async fn unknown_id() {
        let store = UploadStore::new();
        assert!(store.get("nope").await.is_none());
    }
}
