//! Authentication route handlers.
//!
//! Handles login, signup, and logout against the backend's user service.
//! The backend issues the tokens; this layer only runs the flow and owns
//! the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::routes::Viewer;
use crate::services::auth::{AuthError, login as login_flow};
use crate::state::AppState;

// =============================================================================
// Form and query types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

/// Query parameters for post-action feedback.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub viewer: Viewer,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub viewer: Viewer,
    pub error: Option<String>,
}

// =============================================================================
// Login
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let success = match query.success.as_deref() {
        Some("registered") => Some("Account created. You can now sign in.".to_string()),
        _ => None,
    };
    LoginTemplate {
        viewer: Viewer::from_session(user.as_ref()),
        error: None,
        success,
    }
}

/// Handle login form submission.
///
/// On success the identity is stored in the session wholesale and the
/// viewer lands on their profile.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let username = form.username.trim();
    let password = form.password.trim();

    match login_flow(state.backend(), username, password).await {
        Ok(user) => {
            if let Err(error) = set_current_user(&session, &user).await {
                tracing::error!(%error, "failed to store the session");
                return LoginTemplate {
                    viewer: Viewer::default(),
                    error: Some("Could not start your session. Try again.".to_string()),
                    success: None,
                }
                .into_response();
            }
            Redirect::to("/profile").into_response()
        }
        Err(error) => {
            tracing::warn!(%error, "login failed");
            // Surface the backend's own message when it sent one.
            let message = match &error {
                AuthError::MissingToken => {
                    "The server response did not include a token. Try again.".to_string()
                }
                AuthError::Backend(backend_error) => backend_error.to_string(),
            };
            LoginTemplate {
                viewer: Viewer::default(),
                error: Some(message),
                success: None,
            }
            .into_response()
        }
    }
}

// =============================================================================
// Signup
// =============================================================================

/// Display the signup page.
pub async fn register_page(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    RegisterTemplate {
        viewer: Viewer::from_session(user.as_ref()),
        error: None,
    }
}

/// Handle signup form submission.
///
/// New accounts are always visitor-tier; admins are provisioned
/// backend-side.
#[instrument(skip_all)]
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    let username = form.username.trim();
    let password = form.password.trim();

    if username.is_empty() || password.is_empty() {
        return RegisterTemplate {
            viewer: Viewer::default(),
            error: Some("Username and password are required.".to_string()),
        }
        .into_response();
    }

    match state.backend().register_user(username, password).await {
        Ok(()) => Redirect::to("/auth/login?success=registered").into_response(),
        Err(error) => {
            tracing::warn!(%error, "signup failed");
            RegisterTemplate {
                viewer: Viewer::default(),
                error: Some(error.to_string()),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// Clears the stored identity and destroys the session; failures are
/// logged, never surfaced, and the viewer always lands on the home page.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Response {
    if let Err(error) = clear_current_user(&session).await {
        tracing::error!(%error, "failed to clear the session");
    }

    if let Err(error) = session.flush().await {
        tracing::error!(%error, "failed to flush the session");
    }

    Redirect::to("/").into_response()
}
