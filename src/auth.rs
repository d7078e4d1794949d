//! Identity extraction for API requests.
//!
//! Token issuance and verification happen upstream: the authenticating
//! gateway validates the client's bearer token and forwards the subject
//! claim in the [USER_ID_HEADER] header. Handlers receive the caller's
//! identity through the [AuthenticatedUser] extractor and must scope every
//! database operation to it.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The request header carrying the authenticated user's identity claim.
///
/// Set by the gateway after it has verified the bearer token. Requests
/// reaching this service directly, without the header, are rejected.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The identity of the user an entity belongs to.
///
/// This is the opaque subject claim from the gateway's token validation,
/// e.g. a Cognito/OIDC `sub`. All reads and writes are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw identity claim.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identity claim as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extractor for the identity of the authenticated caller.
///
/// Rejects the request with 401 when the identity header is missing or
/// empty.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

/// The error returned when a request carries no usable identity claim.
#[derive(Debug, PartialEq)]
pub enum AuthError {
    /// The identity header was absent or empty.
    MissingIdentity,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingIdentity => "Missing user identity",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": message })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingIdentity)?;

        Ok(AuthenticatedUser(UserId::new(user_id)))
    }
}
