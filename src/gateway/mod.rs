//! Typed HTTP client for the gemshop gateway.
//!
//! [`Gateway`] wraps a [`reqwest::Client`] bound to the configured base URL.
//! Endpoint families live in submodules (`auth`, `products`, `cart`,
//! `orders`, `images`), each adding methods to [`Gateway`].
//!
//! Mutations return `Result<()>` (or the created resource where the gateway
//! returns one) and never refresh anything on their own: callers re-issue
//! the relevant read afterwards.

mod auth;
mod cart;
mod images;
mod orders;
mod products;

use std::collections::HashMap;
use std::sync::Mutex;

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::GemshopError;
use crate::config::GatewayConfig;
use crate::session::Session;

pub use images::PLACEHOLDER_IMAGE_URL;

/// Client for every gateway endpoint the storefront consumes.
#[derive(Debug)]
pub struct Gateway {
    client: reqwest::Client,
    base_url: Url,
    /// Memoized image name → URL lookups.
    image_urls: Mutex<HashMap<String, String>>,
}

impl Gateway {
    /// Builds a client for the configured gateway.
    ///
    /// # Errors
    ///
    /// Returns [`GemshopError::Config`] if the base URL does not parse or
    /// the extra CA certificate cannot be read, and
    /// [`GemshopError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> crate::Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GemshopError::Config(format!("invalid gateway URL {}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GemshopError::Config(format!(
                "gateway URL {} cannot carry a path",
                config.base_url
            )));
        }

        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if let Some(path) = &config.ca_cert {
            let pem = std::fs::read(path).map_err(|e| {
                GemshopError::Config(format!("failed to read CA certificate {}: {e}", path.display()))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                GemshopError::Config(format!("invalid CA certificate {}: {e}", path.display()))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            image_urls: Mutex::new(HashMap::new()),
        })
    }

    /// Returns the gateway base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves path segments against the base URL, percent-encoding each.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Starts a request, attaching the bearer token when a session is given.
    fn request(&self, method: Method, url: Url, session: Option<&Session>) -> RequestBuilder {
        debug!(%method, %url, authenticated = session.is_some(), "gateway request");
        let builder = self.client.request(method, url);
        match session {
            Some(session) => builder.bearer_auth(session.token.expose()),
            None => builder,
        }
    }
}

/// Sends a request and decodes a JSON body.
async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> crate::Result<T> {
    let response = check_status(builder.send().await?).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Sends a request and discards the body.
async fn send_empty(builder: RequestBuilder) -> crate::Result<()> {
    check_status(builder.send().await?).await?;
    Ok(())
}

/// Turns a non-success status into [`GemshopError::Status`].
async fn check_status(response: reqwest::Response) -> crate::Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GemshopError::Status {
        status: status.as_u16(),
        body,
    })
}
