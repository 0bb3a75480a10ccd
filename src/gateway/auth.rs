//! `/auth` endpoints.
//!
//! The methods are named after the paths they call: `sign_in` posts to
//! `/auth/signin` and `sign_up` to `/auth/signup`.

use reqwest::Method;
use tracing::info;

use super::{Gateway, send_empty, send_json};
use crate::models::{AuthResponse, SignInRequest, SignUpRequest};

impl Gateway {
    /// Exchanges credentials for a token via `POST /auth/signin`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects the
    /// credentials.
    pub async fn sign_in(&self, request: &SignInRequest) -> crate::Result<AuthResponse> {
        let url = self.endpoint(&["auth", "signin"]);
        let response: AuthResponse =
            send_json(self.request(Method::POST, url, None).json(request)).await?;
        info!(username = %response.username, "signed in");
        Ok(response)
    }

    /// Registers a new account via `POST /auth/signup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the gateway rejects the
    /// registration (e.g. username taken).
    pub async fn sign_up(&self, request: &SignUpRequest) -> crate::Result<()> {
        let url = self.endpoint(&["auth", "signup"]);
        send_empty(self.request(Method::POST, url, None).json(request)).await?;
        info!(username = %request.username, "registered account");
        Ok(())
    }
}
