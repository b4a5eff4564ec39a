//! Tournament route handlers: list, detail, registration, results, and
//! ranking.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use chefclash_core::eligibility::{eligible_chefs, validate_registration};
use chefclash_core::{Chef, ChefId, RoleTier, TournamentId, ranking};

use crate::backend::BackendError;
use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, RequireAdmin, RequireAuth};
use crate::models::CurrentUser;
use crate::routes::{Flash, Viewer};
use crate::state::AppState;

// =============================================================================
// Form and query types
// =============================================================================

/// Registration form data.
///
/// `chef_id` stays a string here: the admin form submits an empty value
/// for its placeholder option, which is "nothing chosen", not a parse
/// failure.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub chef_id: Option<String>,
}

/// Result submission form data.
#[derive(Debug, Deserialize)]
pub struct ResultForm {
    pub chef_id: Option<String>,
    pub score: String,
    pub notes: Option<String>,
}

/// Parse a form id field, treating empty values as "nothing chosen".
fn parse_form_id(value: Option<&str>) -> Option<i64> {
    value.and_then(|value| value.trim().parse().ok())
}

/// Query parameters for post-action feedback.
#[derive(Debug, Deserialize)]
pub struct FeedbackQuery {
    pub success: Option<String>,
}

impl FeedbackQuery {
    /// Translate a feedback code into a flash message.
    fn into_flash(self) -> Flash {
        match self.success.as_deref() {
            Some("registered") => Flash::success("Chef registered successfully."),
            Some("result_recorded") => Flash::success("Result recorded successfully."),
            Some("chef_removed") => Flash::success("Chef removed from the tournament."),
            _ => Flash::none(),
        }
    }
}

// =============================================================================
// View types
// =============================================================================

/// Tournament card data for the list page.
pub struct CardView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub location_name: String,
    pub occupancy: String,
    pub cta_label: String,
}

/// A registered chef row on the detail page.
pub struct RegisteredView {
    pub chef_id: i64,
    pub name: String,
    pub specialty: Option<String>,
}

/// A selectable chef in the registration form.
pub struct CandidateView {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub selected: bool,
}

/// A results-table row.
pub struct ScoreView {
    pub chef_name: String,
    pub score: String,
    pub notes: String,
}

/// A leaderboard row.
pub struct RankingView {
    pub chef_name: String,
    pub score: String,
}

/// Format occupancy as `registered / capacity`, with `∞` for unlimited.
pub(crate) fn occupancy_display(registered: usize, capacity: Option<u32>) -> String {
    capacity.map_or_else(
        || format!("{registered} / ∞"),
        |capacity| format!("{registered} / {capacity}"),
    )
}

/// Format an optional score for display ("Pending" while absent).
fn score_display(score: Option<f64>) -> String {
    score.map_or_else(|| "Pending".to_string(), |score| score.to_string())
}

// =============================================================================
// Templates
// =============================================================================

/// Tournament list page template.
#[derive(Template, WebTemplate)]
#[template(path = "tournaments/index.html")]
pub struct IndexTemplate {
    pub viewer: Viewer,
    pub cards: Vec<CardView>,
    pub flash: Flash,
}

/// Tournament detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "tournaments/show.html")]
pub struct ShowTemplate {
    pub viewer: Viewer,
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub location_name: String,
    pub occupancy: String,
    pub date: Option<String>,
    pub coordinates: Option<String>,
    pub registered: Vec<RegisteredView>,
    pub candidates: Vec<CandidateView>,
    pub can_register: bool,
    pub registration_title: String,
    pub register_label: String,
    pub select_label: String,
    pub no_candidates_message: String,
    pub scores: Vec<ScoreView>,
    pub flash: Flash,
}

/// Leaderboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "tournaments/ranking.html")]
pub struct RankingTemplate {
    pub viewer: Viewer,
    pub tournament_id: i64,
    pub tournament_name: String,
    pub rows: Vec<RankingView>,
}

// =============================================================================
// List
// =============================================================================

/// Display the tournament list.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<Response> {
    let token = user.as_ref().map(|user| user.token.as_str());
    let viewer = Viewer::from_session(user.as_ref());

    let (tournaments, flash) = match state.backend().tournaments(token).await {
        Ok(tournaments) => (tournaments, Flash::none()),
        Err(error) => {
            tracing::warn!(%error, "could not load tournaments");
            (
                Vec::new(),
                Flash::error(format!("Could not load tournaments: {error}")),
            )
        }
    };

    let directory = state.backend().location_directory(token).await;

    let cta_label = if viewer.is_admin {
        "Manage"
    } else if viewer.is_visitor {
        "Register"
    } else if viewer.is_logged {
        "View details"
    } else {
        "View information"
    };

    let cards = tournaments
        .iter()
        .map(|tournament| CardView {
            id: tournament.id.as_i64(),
            name: tournament.name.clone(),
            description: tournament
                .description
                .clone()
                .unwrap_or_else(|| "No description".to_string()),
            image: tournament.image.clone(),
            location_name: directory.resolve(
                &tournament.location,
                Some(tournament.id.as_i64()),
                &tournament.name,
            ),
            occupancy: occupancy_display(tournament.occupancy(), tournament.capacity),
            cta_label: cta_label.to_string(),
        })
        .collect();

    Ok(IndexTemplate {
        viewer,
        cards,
        flash,
    }
    .into_response())
}

// =============================================================================
// Detail
// =============================================================================

/// Display a tournament's detail page.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<i64>,
    Query(query): Query<FeedbackQuery>,
) -> Result<Response> {
    render_detail(&state, user.as_ref(), TournamentId::new(id), query.into_flash()).await
}

/// Fetch everything the detail page needs and render it.
///
/// Shared by the GET handler and by the POST handlers, which re-render the
/// page directly when an action fails so the backend's message can be
/// shown verbatim.
async fn render_detail(
    state: &AppState,
    user: Option<&CurrentUser>,
    id: TournamentId,
    flash: Flash,
) -> Result<Response> {
    let token = user.map(|user| user.token.as_str());
    let viewer = Viewer::from_session(user);

    let detail = state.backend().tournament(id, token).await.map_err(|error| {
        if matches!(&error, BackendError::Rejected { status: 404, .. }) {
            AppError::NotFound(format!("tournament {id}"))
        } else {
            AppError::Backend(error)
        }
    })?;
    let tournament = &detail.tournament;

    // Chef list failures degrade: the page still renders, the registration
    // form just has nothing to offer.
    let chefs = match state.backend().chefs(token).await {
        Ok(chefs) => chefs,
        Err(error) => {
            tracing::warn!(%error, "could not load chefs for the registration form");
            Vec::new()
        }
    };

    let directory = state.backend().location_directory(token).await;

    let tier = user.map_or(RoleTier::Guest, CurrentUser::role_tier);
    let identity = user.and_then(CurrentUser::chef_identity);

    let eligible = eligible_chefs(tier, identity, &chefs, &tournament.registered_chef_ids());

    // A single candidate for a non-admin viewer is pre-selected.
    let candidates: Vec<CandidateView> = eligible
        .iter()
        .enumerate()
        .map(|(index, chef)| CandidateView {
            id: chef.id.as_i64(),
            name: chef.name.clone(),
            specialty: chef
                .specialty
                .clone()
                .unwrap_or_else(|| "No specialty".to_string()),
            selected: !tier.is_admin() && index == 0,
        })
        .collect();

    let can_register = viewer.is_logged && (tier.is_admin() || identity.is_some());

    let (registration_title, register_label, select_label) = if tier.is_admin() {
        ("Register a chef", "Register chef", "Select a chef")
    } else {
        ("Join this tournament", "Register me", "Confirm your chef profile")
    };

    let no_candidates_message = if tier.is_visitor() {
        "We couldn't find your chef profile available for this tournament."
    } else {
        "There are no chefs available to register right now."
    };

    let registered = tournament
        .registrations
        .iter()
        .map(|registration| RegisteredView {
            chef_id: registration.chef_id.as_i64(),
            name: registration.name.clone(),
            specialty: registration.specialty.clone(),
        })
        .collect();

    let scores = detail
        .score_rows
        .iter()
        .map(|row| ScoreView {
            chef_name: row.chef_name.clone(),
            score: score_display(row.score),
            notes: row.notes.clone().unwrap_or_else(|| "—".to_string()),
        })
        .collect();

    let coordinates = match (tournament.lat, tournament.lon) {
        (Some(lat), Some(lon)) => Some(format!("{lat}, {lon}")),
        _ => None,
    };

    Ok(ShowTemplate {
        viewer,
        id: tournament.id.as_i64(),
        name: tournament.name.clone(),
        description: tournament
            .description
            .clone()
            .unwrap_or_else(|| "No description available.".to_string()),
        image: tournament.image.clone(),
        location_name: directory.resolve(
            &tournament.location,
            Some(tournament.id.as_i64()),
            &tournament.name,
        ),
        occupancy: occupancy_display(tournament.occupancy(), tournament.capacity),
        date: tournament
            .date
            .map(|date| date.format("%Y-%m-%d %H:%M UTC").to_string()),
        coordinates,
        registered,
        candidates,
        can_register,
        registration_title: registration_title.to_string(),
        register_label: register_label.to_string(),
        select_label: select_label.to_string(),
        no_candidates_message: no_candidates_message.to_string(),
        scores,
        flash,
    }
    .into_response())
}

// =============================================================================
// Actions
// =============================================================================

/// Handle a registration submission.
///
/// Re-validates the selection server-side: the candidate set shown in the
/// form was already filtered, but the submitted id may be stale or
/// tampered with.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
    axum::Form(form): axum::Form<RegisterForm>,
) -> Result<Response> {
    let id = TournamentId::new(id);
    let tier = user.role_tier();
    let identity = user.chef_identity();

    let chefs = match state.backend().chefs(Some(&user.token)).await {
        Ok(chefs) => chefs,
        Err(error) => {
            let flash = Flash::error(format!("Could not load chefs: {error}"));
            return render_detail(&state, Some(&user), id, flash).await;
        }
    };

    let chosen: Option<&Chef> = parse_form_id(form.chef_id.as_deref())
        .and_then(|chef_id| chefs.iter().find(|chef| chef.id.as_i64() == chef_id));

    let chef_id = match validate_registration(tier, identity, chosen) {
        Ok(chef_id) => chef_id,
        Err(error) => {
            return render_detail(&state, Some(&user), id, Flash::error(error.to_string())).await;
        }
    };

    match state.backend().register_chef(id, chef_id, &user.token).await {
        Ok(()) => Ok(Redirect::to(&format!("/tournaments/{id}?success=registered")).into_response()),
        Err(error) => {
            let flash = Flash::error(format!("Could not register the chef: {error}"));
            render_detail(&state, Some(&user), id, flash).await
        }
    }
}

/// Handle a result submission (admin only).
#[instrument(skip_all)]
pub async fn submit_result(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<i64>,
    axum::Form(form): axum::Form<ResultForm>,
) -> Result<Response> {
    let id = TournamentId::new(id);

    let Some(chef_id) = parse_form_id(form.chef_id.as_deref()) else {
        let flash = Flash::error("Select a registered chef for the result.");
        return render_detail(&state, Some(&user), id, flash).await;
    };

    let score = form.score.trim().parse::<f64>().ok();
    let Some(score) = score.filter(|score| (0.0..=100.0).contains(score)) else {
        let flash = Flash::error("The score must be between 0 and 100.");
        return render_detail(&state, Some(&user), id, flash).await;
    };

    let notes = form.notes.as_deref().unwrap_or_default().trim().to_string();

    match state
        .backend()
        .submit_result(id, ChefId::new(chef_id), score, &notes, &user.token)
        .await
    {
        Ok(()) => {
            Ok(Redirect::to(&format!("/tournaments/{id}?success=result_recorded")).into_response())
        }
        Err(error) => {
            let flash = Flash::error(format!("Could not record the result: {error}"));
            render_detail(&state, Some(&user), id, flash).await
        }
    }
}

/// Remove a chef from a tournament (admin only).
#[instrument(skip_all)]
pub async fn remove_chef(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path((id, chef_id)): Path<(i64, i64)>,
) -> Result<Response> {
    let id = TournamentId::new(id);

    match state
        .backend()
        .remove_chef(id, ChefId::new(chef_id), &user.token)
        .await
    {
        Ok(()) => {
            Ok(Redirect::to(&format!("/tournaments/{id}?success=chef_removed")).into_response())
        }
        Err(error) => {
            let flash = Flash::error(format!("Could not remove the chef: {error}"));
            render_detail(&state, Some(&user), id, flash).await
        }
    }
}

// =============================================================================
// Ranking
// =============================================================================

/// Display a tournament's leaderboard.
#[instrument(skip_all)]
pub async fn ranking(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<i64>,
) -> Result<Response> {
    let id = TournamentId::new(id);
    let token = user.as_ref().map(|user| user.token.as_str());

    let detail = state.backend().tournament(id, token).await.map_err(|error| {
        if matches!(&error, BackendError::Rejected { status: 404, .. }) {
            AppError::NotFound(format!("tournament {id}"))
        } else {
            AppError::Backend(error)
        }
    })?;

    let entries = state.backend().ranking(id, token).await?;
    let rows = ranking::project(entries)
        .into_iter()
        .map(|entry| RankingView {
            chef_name: entry.chef_name,
            score: score_display(entry.score),
        })
        .collect();

    Ok(RankingTemplate {
        viewer: Viewer::from_session(user.as_ref()),
        tournament_id: id.as_i64(),
        tournament_name: detail.tournament.name,
        rows,
    }
    .into_response())
}
