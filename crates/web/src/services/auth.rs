//! Authentication flow against the backend's user service.
//!
//! Login is a two-step dance: the login endpoint issues the token (and a
//! user summary), then the profile endpoint provides the authoritative
//! identity. If the profile fetch fails, the login payload's user summary
//! is good enough to start the session with.

use thiserror::Error;

use crate::backend::{BackendClient, BackendError};
use crate::models::CurrentUser;

/// Errors that can occur during the login flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend accepted the credentials but sent no token.
    #[error("the login response did not include a token")]
    MissingToken,

    /// Backend failure (wrong credentials arrive as a rejection carrying
    /// the backend's own message).
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Authenticate a user and build their session identity.
///
/// # Errors
///
/// Returns `AuthError::MissingToken` on a malformed login response, or
/// `AuthError::Backend` when the backend rejects the credentials or is
/// unreachable and no fallback identity is available.
pub async fn login(
    backend: &BackendClient,
    username: &str,
    password: &str,
) -> Result<CurrentUser, AuthError> {
    let response = backend.login(username, password).await?;
    let token = response
        .token
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)?;

    match backend.profile(&token).await {
        Ok(profile) => Ok(CurrentUser::from_profile(token, &profile)),
        Err(error) => {
            tracing::warn!(%error, "could not load the profile after login");
            response.user.map_or_else(
                || Err(AuthError::Backend(error)),
                |user| Ok(CurrentUser::from_profile(token.clone(), &user)),
            )
        }
    }
}
