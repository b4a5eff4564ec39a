//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /about                  - About page
//! GET  /health                 - Health check
//!
//! # Tournaments
//! GET  /tournaments                              - Tournament list
//! GET  /tournaments/{id}                         - Tournament detail
//! POST /tournaments/{id}/register                - Register a chef
//! POST /tournaments/{id}/results                 - Submit a result (admin)
//! POST /tournaments/{id}/chefs/{chef_id}/remove  - Remove a chef (admin)
//! GET  /tournaments/{id}/ranking                 - Leaderboard
//!
//! # Chefs (admin)
//! GET  /chefs                  - Chef management page
//! POST /chefs                  - Create chef
//! POST /chefs/{id}             - Update chef
//! POST /chefs/{id}/delete      - Delete chef
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Signup page
//! POST /auth/register          - Signup action
//! POST /auth/logout            - Logout action
//!
//! # Account (requires auth)
//! GET  /profile                - Profile page
//! ```

pub mod auth;
pub mod chefs;
pub mod home;
pub mod profile;
pub mod tournaments;

use axum::{
    Router,
    routing::{get, post},
};

use crate::models::CurrentUser;
use crate::state::AppState;

/// Viewer context shared by every template (navbar, role gating).
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    pub is_logged: bool,
    pub is_admin: bool,
    pub is_visitor: bool,
    pub name: String,
}

impl Viewer {
    /// Build the viewer context from an optional session identity.
    #[must_use]
    pub fn from_session(user: Option<&CurrentUser>) -> Self {
        user.map_or_else(Self::default, |user| {
            let tier = user.role_tier();
            Self {
                is_logged: user.is_logged(),
                is_admin: tier.is_admin(),
                is_visitor: tier.is_visitor(),
                name: user.name.clone(),
            }
        })
    }
}

/// One-shot feedback rendered above a form after an action.
#[derive(Debug, Clone, Default)]
pub struct Flash {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Flash {
    /// No feedback.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            error: None,
            success: None,
        }
    }

    /// An error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            success: None,
        }
    }

    /// A success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            error: None,
            success: Some(message.into()),
        }
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the tournament routes router.
pub fn tournament_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(tournaments::index))
        .route("/{id}", get(tournaments::show))
        .route("/{id}/register", post(tournaments::register))
        .route("/{id}/results", post(tournaments::submit_result))
        .route(
            "/{id}/chefs/{chef_id}/remove",
            post(tournaments::remove_chef),
        )
        .route("/{id}/ranking", get(tournaments::ranking))
}

/// Create the chef management routes router (admin).
pub fn chef_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(chefs::index).post(chefs::create))
        .route("/{id}", post(chefs::update))
        .route("/{id}/delete", post(chefs::delete))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home and static pages
        .route("/", get(home::home))
        .route("/about", get(home::about))
        // Tournament routes
        .nest("/tournaments", tournament_routes())
        // Chef management (admin)
        .nest("/chefs", chef_routes())
        // Auth routes
        .nest("/auth", auth_routes())
        // Account
        .route("/profile", get(profile::show))
}
