//! `/images` endpoints and the memoized image URL lookup.

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::info;

use super::{Gateway, check_status, send_empty};
use crate::session::Session;

/// Shown for products without an image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400";

impl Gateway {
    /// Returns the URL of an image, memoizing the lookup per name.
    ///
    /// An absent or empty name maps to [`PLACEHOLDER_IMAGE_URL`].
    pub fn image_url(&self, name: Option<&str>) -> String {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return PLACEHOLDER_IMAGE_URL.to_string();
        };
        let mut cache = self
            .image_urls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache
            .entry(name.to_string())
            .or_insert_with(|| self.endpoint(&["images", name]).to_string())
            .clone()
    }

    /// Number of memoized image URLs.
    pub fn cached_image_count(&self) -> usize {
        self.image_urls
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().len(), |c| c.len())
    }

    /// Forgets every memoized image URL.
    pub fn clear_image_cache(&self) {
        self.image_urls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    /// Downloads an image via `GET /images/{name}`.
    pub async fn fetch_image(&self, name: &str) -> crate::Result<Vec<u8>> {
        let url = self.endpoint(&["images", name]);
        let response = check_status(self.request(Method::GET, url, None).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Uploads an image via multipart `POST /images/upload`.
    ///
    /// Returns the gateway's confirmation text.
    pub async fn upload_image(
        &self,
        session: Option<&Session>,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> crate::Result<String> {
        let form = Form::new().part("image", Part::bytes(bytes).file_name(file_name.to_string()));
        let url = self.endpoint(&["images", "upload"]);
        let response =
            check_status(self.request(Method::POST, url, session).multipart(form).send().await?)
                .await?;
        info!(file_name, "uploaded image");
        Ok(response.text().await?)
    }

    /// Deletes an image via `DELETE /images/{name}` and drops its cached URL.
    pub async fn delete_image(&self, session: Option<&Session>, name: &str) -> crate::Result<()> {
        self.image_urls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(name);
        let url = self.endpoint(&["images", name]);
        send_empty(self.request(Method::DELETE, url, session)).await?;
        info!(name, "deleted image");
        Ok(())
    }
}
