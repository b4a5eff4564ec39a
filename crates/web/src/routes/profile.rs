//! Profile page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::routes::Viewer;
use crate::state::AppState;

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub viewer: Viewer,
    pub name: String,
    pub username: String,
    pub role: String,
    pub error: Option<String>,
}

/// Display the signed-in user's profile.
///
/// The profile is re-fetched from the backend so role changes show up
/// without a re-login; the session copy is the fallback when the backend
/// is unreachable.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, RequireAuth(user): RequireAuth) -> Response {
    let (current, error) = match state.backend().profile(&user.token).await {
        Ok(profile) => (
            CurrentUser::from_profile(user.token.clone(), &profile),
            None,
        ),
        Err(fetch_error) => {
            tracing::warn!(error = %fetch_error, "could not refresh the profile");
            (user.clone(), Some(fetch_error.to_string()))
        }
    };

    ProfileTemplate {
        viewer: Viewer::from_session(Some(&user)),
        name: if current.name.is_empty() {
            "Not registered".to_string()
        } else {
            current.name.clone()
        },
        username: current.username.clone(),
        role: if current.role.is_empty() {
            "guest".to_string()
        } else {
            current.role.clone()
        },
        error,
    }
    .into_response()
}
