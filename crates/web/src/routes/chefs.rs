//! Chef management route handlers (admin only).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use chefclash_core::ChefId;

use crate::backend::ChefPayload;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::CurrentUser;
use crate::routes::{Flash, Viewer};
use crate::state::AppState;

// =============================================================================
// Form and query types
// =============================================================================

/// Chef create/update form data.
#[derive(Debug, Deserialize)]
pub struct ChefForm {
    pub name: String,
    pub specialty: Option<String>,
    pub experience: String,
}

/// Query parameters for the management page.
#[derive(Debug, Deserialize)]
pub struct ChefsQuery {
    /// Chef id whose row is being edited.
    pub edit: Option<i64>,
    pub success: Option<String>,
}

impl ChefForm {
    /// Validate the form into a backend payload.
    fn into_payload(self) -> std::result::Result<ChefPayload, &'static str> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err("The name is required.");
        }

        let experience = self.experience.trim();
        if experience.is_empty() {
            return Err("The years of experience are required.");
        }
        let Ok(experience) = experience.parse::<u32>() else {
            return Err("The years of experience must be a number of 0 or more.");
        };

        Ok(ChefPayload {
            name,
            specialty: self.specialty.unwrap_or_default().trim().to_string(),
            experience,
            experience_years: experience,
        })
    }
}

// =============================================================================
// View types
// =============================================================================

/// A chef row in the management table.
pub struct ChefRowView {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub experience: String,
}

/// Pre-filled values for the edit form.
pub struct EditingView {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub experience: String,
}

/// Chef management page template.
#[derive(Template, WebTemplate)]
#[template(path = "chefs/index.html")]
pub struct IndexTemplate {
    pub viewer: Viewer,
    pub chefs: Vec<ChefRowView>,
    pub editing: Option<EditingView>,
    pub flash: Flash,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the chef management page.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Query(query): Query<ChefsQuery>,
) -> Result<Response> {
    let flash = match query.success.as_deref() {
        Some("saved") => Flash::success("Chef saved successfully."),
        Some("deleted") => Flash::success("Chef deleted."),
        _ => Flash::none(),
    };
    render_index(&state, &user, query.edit, flash).await
}

/// Fetch the chef list and render the management page.
async fn render_index(
    state: &AppState,
    user: &CurrentUser,
    edit: Option<i64>,
    flash: Flash,
) -> Result<Response> {
    let (chefs, flash) = match state.backend().chefs(Some(&user.token)).await {
        Ok(chefs) => (chefs, flash),
        Err(error) => {
            tracing::warn!(%error, "could not load chefs");
            (
                Vec::new(),
                Flash::error(format!("Could not load chefs: {error}")),
            )
        }
    };

    let editing = edit.and_then(|id| {
        chefs
            .iter()
            .find(|chef| chef.id.as_i64() == id)
            .map(|chef| EditingView {
                id: chef.id.as_i64(),
                name: chef.name.clone(),
                specialty: chef.specialty.clone().unwrap_or_default(),
                experience: chef
                    .experience
                    .map(|experience| experience.to_string())
                    .unwrap_or_default(),
            })
    });

    let rows = chefs
        .iter()
        .map(|chef| ChefRowView {
            id: chef.id.as_i64(),
            name: chef.name.clone(),
            specialty: chef
                .specialty
                .clone()
                .unwrap_or_else(|| "No specialty".to_string()),
            experience: chef
                .experience
                .map_or_else(|| "—".to_string(), |experience| experience.to_string()),
        })
        .collect();

    Ok(IndexTemplate {
        viewer: Viewer::from_session(Some(user)),
        chefs: rows,
        editing,
        flash,
    }
    .into_response())
}

/// Handle chef creation.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Form(form): Form<ChefForm>,
) -> Result<Response> {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(message) => return render_index(&state, &user, None, Flash::error(message)).await,
    };

    match state.backend().create_chef(&payload, &user.token).await {
        Ok(()) => Ok(Redirect::to("/chefs?success=saved").into_response()),
        Err(error) => {
            let flash = Flash::error(format!("Could not save the chef: {error}"));
            render_index(&state, &user, None, flash).await
        }
    }
}

/// Handle chef update.
#[instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<i64>,
    Form(form): Form<ChefForm>,
) -> Result<Response> {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(message) => return render_index(&state, &user, Some(id), Flash::error(message)).await,
    };

    match state
        .backend()
        .update_chef(ChefId::new(id), &payload, &user.token)
        .await
    {
        Ok(()) => Ok(Redirect::to("/chefs?success=saved").into_response()),
        Err(error) => {
            let flash = Flash::error(format!("Could not save the chef: {error}"));
            render_index(&state, &user, Some(id), flash).await
        }
    }
}

/// Handle chef deletion.
#[instrument(skip_all)]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Response> {
    match state.backend().delete_chef(ChefId::new(id), &user.token).await {
        Ok(()) => Ok(Redirect::to("/chefs?success=deleted").into_response()),
        Err(error) => {
            let flash = Flash::error(format!("Could not delete the chef: {error}"));
            render_index(&state, &user, None, flash).await
        }
    }
}
