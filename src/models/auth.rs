//! Authentication request and response models.

use serde::{Deserialize, Serialize};

use super::Secret;

/// Body of `POST /auth/signin`.
#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: Secret,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: Secret,
}

/// Credential exchange result.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<Secret>,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}
