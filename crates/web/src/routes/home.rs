//! Home and about page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::routes::Viewer;
use crate::state::AppState;

/// A tournament teaser for the home page grid.
pub struct TeaserView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub occupancy: String,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub viewer: Viewer,
    /// Upcoming tournaments, newest first (empty when the backend is down).
    pub teasers: Vec<TeaserView>,
}

/// Number of tournaments to tease on the home page.
const TEASER_COUNT: usize = 3;

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let token = user.as_ref().map(|user| user.token.as_str());

    // The home page must render even when the backend is down.
    let teasers = state.backend().tournaments(token).await.map_or_else(
        |error| {
            tracing::warn!(%error, "could not load tournaments for the home page");
            Vec::new()
        },
        |tournaments| {
            tournaments
                .iter()
                .take(TEASER_COUNT)
                .map(|tournament| TeaserView {
                    id: tournament.id.as_i64(),
                    name: tournament.name.clone(),
                    description: tournament
                        .description
                        .clone()
                        .unwrap_or_else(|| "No description available.".to_string()),
                    occupancy: super::tournaments::occupancy_display(
                        tournament.occupancy(),
                        tournament.capacity,
                    ),
                })
                .collect()
        },
    );

    Ok(HomeTemplate {
        viewer: Viewer::from_session(user.as_ref()),
        teasers,
    })
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub viewer: Viewer,
}

/// Display the about page.
pub async fn about(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    AboutTemplate {
        viewer: Viewer::from_session(user.as_ref()),
    }
}
